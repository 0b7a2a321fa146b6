//! Lexing for grammar fragment files
//!
//! This module provides the raw tokenization that every other stage builds
//! on. Fragment text is split on a fixed delimiter set (whitespace, newline,
//! backslash, quotes, comment markers, braces) while keeping each delimiter
//! as its own token, so that joining all tokens reproduces the source text
//! exactly.
//!
//! The lossless round trip (source -> tokens -> source) is a hard invariant:
//! the extractor copies declaration text verbatim out of the token stream,
//! so any token that dropped or altered characters would corrupt the
//! composed grammar. The [`detokenizer`] module provides the reverse
//! direction and the tests that pin the invariant down.

pub mod detokenizer;
pub mod tokenizer;
pub mod tokens;

pub use detokenizer::{detokenize, ToSourceText};
pub use tokenizer::tokenize;
pub use tokens::Token;

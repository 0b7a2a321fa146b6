//! # graft
//!
//! Composes dialect-specific grammars from layered grammar fragment files.
//!
//! A grammar fragment file contains function declarations and token-class
//! assignments. Fragment files live in a directory hierarchy where deeper
//! directories represent more specific dialects: a declaration in a dialect
//! directory overrides a declaration of the same name defined closer to the
//! root. `graft` walks the tree from the shared root down to one target
//! dialect directory and accumulates every declaration in override order,
//! producing the ordered declaration map that a grammar-emission step
//! consumes.
//!
//! The pipeline consists of:
//! 1. Tokenization of raw fragment text ([`lexing`])
//! 2. Brace-block tracking across strings, chars and comments ([`braces`])
//! 3. Declaration boundary location and carving ([`extraction`])
//! 4. Directory-tree composition in override order ([`composing`])
//!
//! `graft` never interprets the fragment language itself; it only locates
//! lexical boundaries and copies declaration text verbatim.

pub mod braces;
pub mod composing;
pub mod extraction;
pub mod keyword;
pub mod lexing;

pub use braces::{BraceTracker, LexicalContext};
pub use composing::{compose, ComposeError, Composition, DialectComposer};
pub use extraction::{extract_declarations, DeclarationSet, ExtractError};
pub use keyword::{keywords_from_assignment, Keyword};
pub use lexing::{detokenize, tokenize, Token};

//! Detokenizer for grammar fragment token streams
//!
//! Converts a stream of tokens back into source text. The extractor builds
//! declaration buffers by appending token source text one token at a time,
//! which is detokenization in lockstep; this module is the standalone form
//! used for round-trip testing (source -> tokens -> source) and debugging.

use crate::lexing::tokens::Token;

/// Trait for converting a token to its source representation
pub trait ToSourceText {
    fn to_source_text(&self) -> String;
}

impl ToSourceText for Token {
    fn to_source_text(&self) -> String {
        self.source().to_owned()
    }
}

/// Detokenize a stream of tokens into a string
///
/// Joining is exact: for any `source`, detokenizing the output of
/// [`crate::lexing::tokenize`] reproduces `source` byte for byte.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::new();
    for token in tokens {
        result.push_str(token.source());
    }
    result
}

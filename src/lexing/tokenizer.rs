//! Base tokenization for grammar fragment text
//!
//! This is the entry point where fragment source becomes a token stream.
//! Tokenization is total: the catch-all text class covers every character
//! the delimiter variants do not, so no input can fail to lex. The stream
//! carries source spans because the declaration extractor runs regex head
//! matches over the raw text and has to line token positions up with match
//! offsets.

use crate::lexing::tokens::Token;
use logos::Logos;

/// Tokenize fragment source with location information
///
/// Returns tokens paired with their byte spans in `source`. Joining the
/// tokens' source text reproduces `source` exactly; empty input yields an
/// empty stream. Pure and deterministic.
pub fn tokenize(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let token = match result {
            Ok(token) => token,
            // Unreachable with a total token set, but losslessness must not
            // depend on that: keep the slice as opaque text.
            Err(()) => Token::Text(lexer.slice().to_owned()),
        };
        tokens.push((token, lexer.span()));
    }

    tokens
}

//! Brace-block tracking across strings, chars and comments
//!
//! [`BraceTracker`] is a small state machine that consumes one token at a
//! time and reports whether a top-level `{...}` block has just closed. Only
//! structural braces count: braces inside string literals, character
//! literals, line comments and block comments never touch the depth.
//!
//! The tracker keeps a single token of lookback to detect escaped quotes.
//! A quote whose preceding token is a backslash does not toggle string or
//! char context. Known limitation: a quote preceded by an escaped backslash
//! (`\\"`) is still treated as escaped, since only the immediately
//! preceding token is inspected.
//!
//! `feed` returns `depth == 0` after every token, including before any `{`
//! has been seen: a tracker fed only non-brace tokens continuously reports
//! "closed". Callers that mean "a complete block was consumed" must make
//! sure the first fed token is the opening brace; see
//! `extraction::consume_brace_block`, whose whitespace pre-skip exists for
//! exactly this reason.

use crate::lexing::Token;

/// Lexical context the tracker is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalContext {
    Plain,
    InString,
    InChar,
    InLineComment,
    InBlockComment,
}

/// Streaming brace-depth tracker
#[derive(Debug, Clone)]
pub struct BraceTracker {
    context: LexicalContext,
    depth: i32,
    previous: Option<Token>,
}

impl BraceTracker {
    pub fn new() -> Self {
        Self {
            context: LexicalContext::Plain,
            depth: 0,
            previous: None,
        }
    }

    /// Current lexical context
    pub fn context(&self) -> LexicalContext {
        self.context
    }

    /// Current structural brace depth
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Consume one token; returns whether the depth is zero after the update
    pub fn feed(&mut self, token: &Token) -> bool {
        use LexicalContext::*;

        let escaped = matches!(self.previous, Some(Token::Backslash));

        match (token, self.context) {
            (Token::Newline, InLineComment) => self.context = Plain,
            (Token::DoubleQuote, Plain) if !escaped => self.context = InString,
            (Token::DoubleQuote, InString) if !escaped => self.context = Plain,
            (Token::SingleQuote, Plain) if !escaped => self.context = InChar,
            (Token::SingleQuote, InChar) if !escaped => self.context = Plain,
            (Token::LineCommentStart, Plain) => self.context = InLineComment,
            (Token::BlockCommentStart, Plain) => self.context = InBlockComment,
            (Token::BlockCommentEnd, InBlockComment) => self.context = Plain,
            (Token::OpenBrace, Plain) => self.depth += 1,
            (Token::CloseBrace, Plain) => self.depth -= 1,
            _ => {}
        }

        self.previous = Some(token.clone());
        self.depth == 0
    }
}

impl Default for BraceTracker {
    fn default() -> Self {
        Self::new()
    }
}

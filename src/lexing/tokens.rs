//! Token definitions for grammar fragment text
//!
//! Tokens are defined with the logos derive macro. Every delimiter that the
//! brace tracker cares about gets its own variant; everything else collapses
//! into `Whitespace` or `Text` runs that carry their source slice so the
//! stream stays lossless.
//!
//! Lone `/` and `*` characters lex as their own `Text` tokens: they have to
//! be excluded from the catch-all class so that the two-character comment
//! delimiters `//`, `/*` and `*/` can win by longest match.

use logos::Logos;
use serde::Serialize;

/// All tokens produced from grammar fragment text
#[derive(Logos, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Token {
    /// Runs of spaces, tabs and carriage returns (newline is separate)
    #[regex(r"[ \t\r]+", |lex| lex.slice().to_owned())]
    Whitespace(String),

    #[token("\n")]
    Newline,

    #[token("\\")]
    Backslash,

    #[token("\"")]
    DoubleQuote,

    #[token("'")]
    SingleQuote,

    #[token("//")]
    LineCommentStart,

    #[token("/*")]
    BlockCommentStart,

    #[token("*/")]
    BlockCommentEnd,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    /// Catch-all for everything that is not a delimiter
    #[regex(r#"[^ \t\r\n\\"'{}/*]+"#, |lex| lex.slice().to_owned())]
    #[token("/", |lex| lex.slice().to_owned())]
    #[token("*", |lex| lex.slice().to_owned())]
    Text(String),
}

impl Token {
    /// The exact source characters this token stands for
    pub fn source(&self) -> &str {
        match self {
            Token::Whitespace(s) | Token::Text(s) => s,
            Token::Newline => "\n",
            Token::Backslash => "\\",
            Token::DoubleQuote => "\"",
            Token::SingleQuote => "'",
            Token::LineCommentStart => "//",
            Token::BlockCommentStart => "/*",
            Token::BlockCommentEnd => "*/",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
        }
    }

    /// Check if this token is whitespace or a newline
    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Whitespace(_) | Token::Newline)
    }

    /// Check if this token opens a brace block
    pub fn is_open_brace(&self) -> bool {
        matches!(self, Token::OpenBrace)
    }
}

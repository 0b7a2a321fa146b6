//! Declaration carving
//!
//! Walks the token stream in lockstep with the heads located by
//! [`crate::extraction::heads`] and copies each declaration's complete text
//! into a buffer: everything from the cursor position up to the head's end,
//! then one brace block (token assignments) or two (functions). Text between
//! declarations, typically comments documenting the declaration that
//! follows, travels with the declaration after it.

use crate::braces::BraceTracker;
use crate::extraction::heads::{find_heads, DeclarationHead, HeadKind};
use crate::lexing::{tokenize, Token};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Declarations extracted from one fragment file, or accumulated across
/// many by the dialect composer.
///
/// `functions` is insertion-ordered; inserting an existing name overwrites
/// the text but keeps the original position, which is exactly the
/// override rule the composer needs. `token_assignments` are anonymous and
/// only ever appended, never deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeclarationSet {
    pub functions: IndexMap<String, String>,
    pub token_assignments: Vec<String>,
}

impl DeclarationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` into `self`: functions last-write-wins by name, token
    /// assignments appended in order.
    pub fn merge(&mut self, other: DeclarationSet) {
        for (name, text) in other.functions {
            self.functions.insert(name, text);
        }
        self.token_assignments.extend(other.token_assignments);
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.token_assignments.is_empty()
    }
}

/// Error locating a declaration's brace blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExtractError {
    /// The head was not followed (after whitespace) by an opening brace
    MalformedBlock {
        declaration: String,
        found: String,
    },
    /// The token stream ended before the block closed
    UnterminatedBlock { declaration: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MalformedBlock { declaration, found } => write!(
                f,
                "malformed block after declaration `{}`: expected `{{`, found {}",
                declaration, found
            ),
            ExtractError::UnterminatedBlock { declaration } => write!(
                f,
                "unterminated block after declaration `{}`: input ended before the block closed",
                declaration
            ),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Forward-only cursor over the token stream, tracking the byte offset of
/// the next unconsumed token.
struct Cursor {
    tokens: Vec<(Token, logos::Span)>,
    index: usize,
    total_len: usize,
}

impl Cursor {
    fn new(tokens: Vec<(Token, logos::Span)>) -> Self {
        let total_len = tokens.last().map(|(_, span)| span.end).unwrap_or(0);
        Self {
            tokens,
            index: 0,
            total_len,
        }
    }

    /// Byte offset of the next unconsumed token (input length at the end)
    fn offset(&self) -> usize {
        self.tokens
            .get(self.index)
            .map(|(_, span)| span.start)
            .unwrap_or(self.total_len)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).map(|(token, _)| token.clone());
        if token.is_some() {
            self.index += 1;
        }
        token
    }
}

/// Extract every declaration from one fragment file.
///
/// Line endings are normalized to `\n` before any matching happens, so head
/// offsets, token spans and declaration text all agree on one newline form.
/// A malformed or unterminated block aborts extraction for the whole file.
pub fn extract_declarations(source: &str) -> Result<DeclarationSet, ExtractError> {
    let text = normalize_newlines(source);
    let heads = find_heads(&text);
    let mut cursor = Cursor::new(tokenize(&text));
    let mut set = DeclarationSet::new();

    for head in heads {
        // A head match inside an already-consumed block is not a
        // declaration boundary; the cursor has moved past it.
        if head.start < cursor.offset() {
            continue;
        }

        let mut buffer = String::new();
        while cursor.offset() < head.end {
            match cursor.bump() {
                Some(token) => buffer.push_str(token.source()),
                None => break,
            }
        }

        let label = declaration_label(&text, &head);
        match head.kind {
            HeadKind::Function { name } => {
                consume_brace_block(&mut buffer, &mut cursor, &label)?;
                consume_brace_block(&mut buffer, &mut cursor, &label)?;
                set.functions.insert(name, buffer);
            }
            HeadKind::TokenAssignment => {
                consume_brace_block(&mut buffer, &mut cursor, &label)?;
                set.token_assignments.push(buffer);
            }
        }
    }

    Ok(set)
}

/// Consume one complete brace block into `buffer`.
///
/// Leading whitespace and newlines are consumed first; the tracker reports
/// depth zero from the start, so handing it a blank token before the `{`
/// would declare the block closed before it opened.
fn consume_brace_block(
    buffer: &mut String,
    cursor: &mut Cursor,
    declaration: &str,
) -> Result<(), ExtractError> {
    while matches!(cursor.peek(), Some(token) if token.is_blank()) {
        if let Some(token) = cursor.bump() {
            buffer.push_str(token.source());
        }
    }

    match cursor.peek() {
        Some(token) if token.is_open_brace() => {}
        other => {
            let found = match other {
                Some(token) => format!("`{}`", token.source().escape_debug()),
                None => "end of input".to_string(),
            };
            return Err(ExtractError::MalformedBlock {
                declaration: declaration.to_string(),
                found,
            });
        }
    }

    let mut tracker = BraceTracker::new();
    while let Some(token) = cursor.bump() {
        buffer.push_str(token.source());
        if tracker.feed(&token) {
            return Ok(());
        }
    }

    Err(ExtractError::UnterminatedBlock {
        declaration: declaration.to_string(),
    })
}

/// Trimmed head text, used to identify the declaration in errors
fn declaration_label(text: &str, head: &DeclarationHead) -> String {
    text[head.start..head.end].trim().to_string()
}

/// Collapse `\r\n` and bare `\r` line endings into `\n`
fn normalize_newlines(source: &str) -> String {
    source.replace("\r\n", "\n").replace('\r', "\n")
}

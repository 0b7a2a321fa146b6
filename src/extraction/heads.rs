//! Declaration head location
//!
//! Heads are found with regex patterns over the raw fragment text, not over
//! the token stream. The type grammar is an approximation: a dotted
//! identifier with at most one level of angle-bracket generic parameters.
//! That covers `String`, `List<String>`, `Map<String, String>` and
//! `Foo.Bar`, which is as deep as fragment signatures go; arbitrarily
//! nested generics are out of reach for a single regex and are not
//! attempted.

use once_cell::sync::Lazy;
use regex::Regex;

/// Identifier fragment shared by both head patterns
const IDENT: &str = r"[A-Za-z_][A-Za-z0-9_]*";

/// Function declaration head: `<type> <name> ( [params] ) :` with an
/// optional trailing newline. Capture group 1 is the declared name (the
/// identifier immediately preceding the parameter list).
static FUNCTION_HEAD: Lazy<Regex> = Lazy::new(|| {
    let ident = IDENT;
    let ty = format!(r"{ident}(?:\.{ident})*(?:<[^<>]*>)?");
    Regex::new(&format!(
        r"{ty}\s+({ident})\s*\(\s*(?:{ty}\s+{ident}(?:\s*,\s*{ty}\s+{ident})*\s*)?\)\s*:[ \t]*\n?"
    ))
    .unwrap()
});

/// Token-class assignment head: `[< STATE (, STATE)* >] (TOKEN|SKIP|MORE) :`
/// with an optional trailing newline.
static TOKEN_ASSIGNMENT_HEAD: Lazy<Regex> = Lazy::new(|| {
    let ident = IDENT;
    Regex::new(&format!(
        r"(?:<\s*{ident}(?:\s*,\s*{ident})*\s*>[ \t]*)?\b(?:TOKEN|SKIP|MORE)\s*:[ \t]*\n?"
    ))
    .unwrap()
});

/// What kind of declaration a head introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadKind {
    /// Named function declaration; followed by two brace blocks
    Function { name: String },
    /// Anonymous token-class assignment; followed by one brace block
    TokenAssignment,
}

/// A located declaration head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationHead {
    pub kind: HeadKind,
    /// Byte offset of the head's first character
    pub start: usize,
    /// Byte offset just past the head (past the trailing newline if matched)
    pub end: usize,
}

/// Find all declaration heads in `text`, in ascending offset order.
///
/// Matches from the two patterns are interleaved by start offset; a match
/// that begins inside an earlier match is dropped, so the returned heads
/// never overlap.
pub fn find_heads(text: &str) -> Vec<DeclarationHead> {
    let mut heads: Vec<DeclarationHead> = Vec::new();

    for caps in FUNCTION_HEAD.captures_iter(text) {
        let whole = caps.get(0).expect("group 0 always present");
        let name = caps.get(1).expect("name group always present");
        heads.push(DeclarationHead {
            kind: HeadKind::Function {
                name: name.as_str().to_owned(),
            },
            start: whole.start(),
            end: whole.end(),
        });
    }

    for found in TOKEN_ASSIGNMENT_HEAD.find_iter(text) {
        heads.push(DeclarationHead {
            kind: HeadKind::TokenAssignment,
            start: found.start(),
            end: found.end(),
        });
    }

    heads.sort_by_key(|head| head.start);

    let mut consumed_until = 0;
    heads.retain(|head| {
        if head.start < consumed_until {
            return false;
        }
        consumed_until = head.end;
        true
    });

    heads
}

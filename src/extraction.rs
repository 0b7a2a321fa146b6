//! Declaration extraction from grammar fragment files
//!
//! A fragment file holds two kinds of declaration:
//!
//! - function declarations: a head like `ReturnType name(Type arg) :`
//!   followed by exactly two brace blocks (properties, then body);
//! - token-class assignments: a head like `<STATE> TOKEN :` followed by
//!   exactly one brace block.
//!
//! [`heads`] locates declaration heads with regex patterns over the raw
//! text; [`extractor`] walks the token stream in lockstep with the located
//! heads and carves out each declaration's complete text verbatim,
//! whitespace and comments included.

pub mod extractor;
pub mod heads;

pub use extractor::{extract_declarations, DeclarationSet, ExtractError};
pub use heads::{find_heads, DeclarationHead, HeadKind};

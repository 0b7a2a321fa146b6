//! Canonicalized keyword value type
//!
//! Keyword lists derived from token-class declarations get deduplicated and
//! merged when dialect grammars are assembled. A [`Keyword`] canonicalizes
//! its name to upper case at construction and compares by canonical name
//! plus origin: two keywords are equal when their names match and either
//! neither records an origin or both record the same one. A keyword with an
//! origin never equals one without, even under the same name.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// One `< NAME: "value" >` entry inside a token-assignment block
static KEYWORD_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<\s*([A-Za-z_][A-Za-z0-9_]*)\s*:\s*("[^"]*")\s*>"#).unwrap());

/// A grammar keyword: canonical name, source value, optional origin path
#[derive(Debug, Clone, Serialize)]
pub struct Keyword {
    name: String,
    value: String,
    origin: Option<String>,
}

impl Keyword {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_uppercase(),
            value: value.into(),
            origin: None,
        }
    }

    pub fn with_origin(
        name: impl Into<String>,
        value: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            origin: Some(origin.into()),
            ..Self::new(name, value)
        }
    }

    /// Canonical (upper-cased) keyword name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Path of the fragment file this keyword came from, if recorded
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}

/// Derive the keywords a token-assignment declaration defines.
///
/// Only simple literal entries (`< NAME: "value" >`) produce keywords;
/// regular-expression token entries carry no keyword value and are skipped.
/// `origin` is recorded on every derived keyword when given.
pub fn keywords_from_assignment(declaration: &str, origin: Option<&str>) -> Vec<Keyword> {
    KEYWORD_ENTRY
        .captures_iter(declaration)
        .map(|caps| {
            let name = &caps[1];
            let value = &caps[2];
            match origin {
                Some(origin) => Keyword::with_origin(name, value, origin),
                None => Keyword::new(name, value),
            }
        })
        .collect()
}

impl PartialEq for Keyword {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name {
            return false;
        }
        match (&self.origin, &other.origin) {
            (None, None) => true,
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Name only: equal keywords always share a name, and hashing the
        // origin would have to distinguish present-vs-absent anyway.
        self.name.hash(state);
    }
}

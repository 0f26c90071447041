//! Structure type identifiers.

use std::fmt;

/// The identifier that names a structure's type, e.g. the `Metric` in
/// `Metric {key = "distance"}`.
///
/// Always owned: buffers are copied out of the source text during lexing
/// rather than borrowed, per spec.md §5.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Wraps `text` as an identifier without validating its grammar; callers
    /// that need grammar validation should go through the lexer.
    pub fn new(text: impl Into<String>) -> Self {
        Identifier(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier(s)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier(s.to_string())
    }
}

//! Error types for the OpenDDL parser.
//!
//! `ParsingError` carries a `kind`, a byte `position`, and a contextual
//! snippet, with `Display` composing all three; `Display`/`Error` impls are
//! derived via `thiserror` rather than written out by hand.

use thiserror::Error;

/// Default length of context shown around the offending byte.
const DEFAULT_CONTEXT_LENGTH: usize = 32;

/// The closed set of error kinds a parse can fail with (spec.md §7).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("malformed comment")]
    MalformedComment,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("integer literal out of range for its target type")]
    IntegerRange,
    #[error("data array group arity does not match the declared arity")]
    ArityMismatch,
    #[error("invalid or missing array arity in `[N]`")]
    InvalidArity,
    #[error("literal does not match the enclosing primitive type")]
    TypeMismatch,
    #[error("expected token not found")]
    ExpectedToken,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unknown identifier")]
    UnknownIdentifier,
    #[error("parser made no progress")]
    NoProgress,
}

/// A parse failure, carrying its kind, the byte offset where it was
/// detected, and a short lossily-decoded snippet of the bytes around that
/// offset for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at byte {position}: {context:?}")]
pub struct ParsingError {
    kind: ErrorKind,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Builds a `ParsingError`, deriving the context snippet from `buf`
    /// around `position`.
    pub fn new(kind: ErrorKind, position: usize, buf: &[u8]) -> Self {
        let context = context_snippet(buf, position, DEFAULT_CONTEXT_LENGTH);
        ParsingError { kind, position, context }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

fn context_snippet(buf: &[u8], position: usize, len: usize) -> String {
    let start = position.min(buf.len());
    let end = (start + len).min(buf.len());
    String::from_utf8_lossy(&buf[start..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position_and_context() {
        let err = ParsingError::new(ErrorKind::UnexpectedToken, 3, b"abc}def");
        let text = err.to_string();
        assert!(text.contains("byte 3"));
        assert!(text.contains("}def"));
    }
}

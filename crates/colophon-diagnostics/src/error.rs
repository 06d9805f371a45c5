//! Error types for the diagnostics crate.

use thiserror::Error;

/// A distinguished name that does not follow the RFC 4514 string syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed distinguished name {input:?} at offset {position}: {reason}")]
pub struct MalformedNameError {
    /// The rejected input.
    pub input: String,
    /// Byte offset where parsing failed.
    pub position: usize,
    /// What the parser expected.
    pub reason: &'static str,
}

impl MalformedNameError {
    pub(crate) fn new(input: &str, position: usize, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            position,
            reason,
        }
    }
}

/// Result type for diagnostics operations.
pub type Result<T> = std::result::Result<T, MalformedNameError>;

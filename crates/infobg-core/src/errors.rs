//! Cross-cutting error types for infobg.
//!
//! Domain-specific errors (e.g., `CatalogError`, `BatchError`) live in their
//! respective crates. The binary converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any infobg crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A territorial code does not have the expected shape.
    #[error("Invalid {kind} code '{value}': {reason}")]
    InvalidCode {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    /// An enum discriminant read from a source file is out of range.
    #[error("Invalid {kind} value: {value}")]
    InvalidDiscriminant { kind: &'static str, value: i64 },

    /// A source record is missing a field or has one of the wrong type.
    #[error("Validation error: {0}")]
    Validation(String),
}

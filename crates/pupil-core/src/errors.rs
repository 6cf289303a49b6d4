//! Cross-cutting error types for Pupil.
//!
//! Domain-specific errors (`StoreError`, `MigrationError`, ...) live in their
//! respective crates. Everything converges into `anyhow` in `pupil-cli`.

use thiserror::Error;

/// Errors that can be raised by any Pupil crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An ID source could not mint an ID.
    #[error("ID source unavailable: {0}")]
    Entropy(String),

    /// A JSON value could not be read as a typed entity.
    #[error("Invalid {entity}: {reason}")]
    InvalidEntity { entity: &'static str, reason: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

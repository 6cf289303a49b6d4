//! Migration error types.

use pupil_core::errors::CoreError;
use pupil_store::StoreError;
use thiserror::Error;

/// Errors that abort a migration run. Nothing is persisted once one of these
/// is raised.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The document or blob store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An inline file could not be moved into the blob store.
    #[error("Failed to write blob {id}: {source}")]
    BlobWrite {
        id: String,
        #[source]
        source: StoreError,
    },

    /// A field migrator failed.
    #[error("Migrator '{name}' failed: {source}")]
    Migrator {
        name: &'static str,
        #[source]
        source: CoreError,
    },

    /// The persisted document root is not a JSON object.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The migrated document does not match the current schema and strict
    /// validation is enabled.
    #[error("Migrated document violates the schema: {}", errors.join("; "))]
    SchemaViolation { errors: Vec<String> },

    /// A backup bundle could not be read or is not a full backup.
    #[error("Invalid backup bundle: {0}")]
    InvalidBundle(String),

    #[error("Backup I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

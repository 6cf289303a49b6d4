//! Storage error types for pupil-store.

use thiserror::Error;

/// Errors from document and blob storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or initialized.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// No blob exists under the requested id.
    #[error("Blob not found: {0}")]
    BlobNotFound(String),

    /// A persisted document is not valid JSON.
    #[error("Document '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from resolving a file reference to a file on disk.
///
/// All variants are recoverable: a failed download never affects the
/// document.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The reference points at a blob that does not exist.
    #[error("File '{name}' ({id}) is missing from the blob store")]
    MissingBlob { id: String, name: String },

    /// The stored content claims base64 encoding but does not decode.
    #[error("File '{id}' has undecodable content: {reason}")]
    Decode { id: String, reason: String },

    #[error("Failed to write download: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

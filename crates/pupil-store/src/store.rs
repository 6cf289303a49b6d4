//! Storage traits consumed by the migration pipeline.
//!
//! Both traits are single-writer: the application owns one document and one
//! blob store for the life of the process, and nothing here adds locking
//! beyond what the backend serializes natively.

use serde_json::Value;

use crate::error::StoreError;

/// Key-to-content storage for uploaded files, kept out of the main document.
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    /// Open or create the underlying store. Idempotent; must complete before
    /// any `put`/`get`.
    async fn init(&self) -> Result<(), StoreError>;

    /// Store content under `id`. Overwriting is allowed but the migration
    /// flow always uses fresh ids.
    async fn put(&self, id: &str, content: &str) -> Result<(), StoreError>;

    /// Fetch previously stored content.
    ///
    /// Returns `StoreError::BlobNotFound` when nothing is stored under `id`.
    async fn get(&self, id: &str) -> Result<String, StoreError>;

    /// Number of stored blobs.
    async fn count(&self) -> Result<usize, StoreError>;
}

/// Named JSON document persistence.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Load the document stored under `key`, or `None` if none was saved.
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the document stored under `key`.
    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError>;
}

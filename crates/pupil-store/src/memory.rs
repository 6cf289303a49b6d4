//! In-process store used by tests and dry runs.
//!
//! Implements both storage traits over plain maps and counts writes so tests
//! can assert that a run did or did not persist. Failure switches simulate an
//! unavailable store or a failing blob write.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde_json::Value;

use crate::error::StoreError;
use crate::store::{BlobStore, DocumentStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, Value>>,
    blobs: Mutex<BTreeMap<String, String>>,
    document_writes: AtomicUsize,
    blob_writes: AtomicUsize,
    fail_init: AtomicBool,
    fail_blob_writes: AtomicBool,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with one document.
    #[must_use]
    pub fn with_document(key: &str, document: Value) -> Self {
        let store = Self::new();
        if let Ok(mut docs) = store.documents.lock() {
            docs.insert(key.to_string(), document);
        }
        store
    }

    /// Make every subsequent `init` fail with `StoreError::Unavailable`.
    pub fn fail_init(&self, fail: bool) {
        self.fail_init.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent blob `put` fail.
    pub fn fail_blob_writes(&self, fail: bool) {
        self.fail_blob_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of document saves since creation.
    #[must_use]
    pub fn document_writes(&self) -> usize {
        self.document_writes.load(Ordering::SeqCst)
    }

    /// Number of successful blob puts since creation.
    #[must_use]
    pub fn blob_writes(&self) -> usize {
        self.blob_writes.load(Ordering::SeqCst)
    }

    /// Snapshot of every stored blob.
    #[must_use]
    pub fn blobs(&self) -> BTreeMap<String, String> {
        self.blobs.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Snapshot of a stored document without going through the async trait.
    #[must_use]
    pub fn document(&self, key: &str) -> Option<Value> {
        self.documents
            .lock()
            .ok()
            .and_then(|docs| docs.get(key).cloned())
    }
}

impl BlobStore for MemoryStore {
    async fn init(&self) -> Result<(), StoreError> {
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store init disabled".into()));
        }
        Ok(())
    }

    async fn put(&self, id: &str, content: &str) -> Result<(), StoreError> {
        if self.fail_blob_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Query(format!("blob write rejected for {id}")));
        }
        self.blobs
            .lock()
            .map_err(poisoned)?
            .insert(id.to_string(), content.to_string());
        self.blob_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<String, StoreError> {
        self.blobs
            .lock()
            .map_err(poisoned)?
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::BlobNotFound(id.to_string()))
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.blobs.lock().map_err(poisoned)?.len())
    }
}

impl DocumentStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.documents.lock().map_err(poisoned)?.get(key).cloned())
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        self.documents
            .lock()
            .map_err(poisoned)?
            .insert(key.to_string(), document.clone());
        self.document_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

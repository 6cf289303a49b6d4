//! # pupil-store
//!
//! Persistence for Pupil: one named JSON document plus a separate keyed blob
//! store for uploaded file content.
//!
//! The store is split along two traits, [`DocumentStore`] and [`BlobStore`],
//! so the migration pipeline can run against the libSQL-backed [`PupilDb`]
//! in production and the in-process [`MemoryStore`] in tests.

pub mod download;
pub mod error;
pub mod journal;
pub mod memory;
mod migrations;
pub mod repos;
pub mod store;

pub use download::trigger_download;
pub use error::{DownloadError, StoreError};
pub use memory::MemoryStore;
pub use store::{BlobStore, DocumentStore};

use std::path::Path;

use libsql::Builder;

/// Local libSQL database holding the `documents` and `blobs` tables.
pub struct PupilDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl PupilDb {
    /// Open a local database at the given path, or `":memory:"` for tests.
    ///
    /// Creates the parent directory when needed and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, StoreError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        StoreError::Unavailable(format!("create {}: {e}", parent.display()))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Unavailable(format!("open {path}: {e}")))?;
        let conn = db
            .connect()
            .map_err(|e| StoreError::Unavailable(format!("connect {path}: {e}")))?;

        let store = Self { db, conn };
        store.run_migrations().await?;
        tracing::debug!(path, "opened pupil database");
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> PupilDb {
        PupilDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        for table in ["documents", "blobs"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn open_local_creates_parent_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("pupil.db");
        let db = PupilDb::open_local(path.to_str().unwrap()).await.unwrap();
        drop(db);
        assert!(path.exists());
    }
}

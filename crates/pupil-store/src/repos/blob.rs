//! Blob repository: file content keyed by file-reference id.

use chrono::Utc;

use crate::PupilDb;
use crate::error::StoreError;
use crate::store::BlobStore;

impl BlobStore for PupilDb {
    async fn init(&self) -> Result<(), StoreError> {
        self.run_migrations().await
    }

    async fn put(&self, id: &str, content: &str) -> Result<(), StoreError> {
        self.conn()
            .execute(
                "INSERT INTO blobs (id, content, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET content = excluded.content",
                libsql::params![id, content, Utc::now().to_rfc3339()],
            )
            .await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<String, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT content FROM blobs WHERE id = ?1",
                libsql::params![id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::BlobNotFound(id.to_string()))?;
        Ok(row.get::<String>(0)?)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let mut rows = self.conn().query("SELECT COUNT(*) FROM blobs", ()).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("COUNT returned no row".into()))?;
        let count = row.get::<i64>(0)?;
        usize::try_from(count).map_err(|e| StoreError::Query(format!("blob count {count}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let db = PupilDb::open_local(":memory:").await.unwrap();
        db.init().await.unwrap();
        db.put("file-1", "data:text/plain;base64,aGk=").await.unwrap();
        assert_eq!(db.get("file-1").await.unwrap(), "data:text/plain;base64,aGk=");
        assert_eq!(db.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let db = PupilDb::open_local(":memory:").await.unwrap();
        let err = db.get("file-nope").await.unwrap_err();
        assert!(matches!(err, StoreError::BlobNotFound(id) if id == "file-nope"));
    }

    #[tokio::test]
    async fn put_overwrites_existing_key() {
        let db = PupilDb::open_local(":memory:").await.unwrap();
        db.put("file-1", "old").await.unwrap();
        db.put("file-1", "new").await.unwrap();
        assert_eq!(db.get("file-1").await.unwrap(), "new");
        assert_eq!(db.count().await.unwrap(), 1);
    }
}

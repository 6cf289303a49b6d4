//! Document repository: named JSON documents.

use chrono::Utc;
use serde_json::Value;

use crate::PupilDb;
use crate::error::StoreError;
use crate::store::DocumentStore;

impl DocumentStore for PupilDb {
    async fn load(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT body FROM documents WHERE key = ?1",
                libsql::params![key],
            )
            .await?;
        let Some(row) = rows.next().await? else {
            return Ok(None);
        };
        let body = row.get::<String>(0)?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn save(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let body = serde_json::to_string(document).map_err(|e| StoreError::Other(e.into()))?;
        self.conn()
            .execute(
                "INSERT INTO documents (key, body, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                libsql::params![key, body, Utc::now().to_rfc3339()],
            )
            .await?;
        tracing::debug!(key, "saved document");
        Ok(())
    }
}

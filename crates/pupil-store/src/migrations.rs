//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::PupilDb;
use crate::error::StoreError;

/// Initial schema: `documents` and `blobs`.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl PupilDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| StoreError::Unavailable(format!("001_initial: {e}")))?;
        Ok(())
    }
}

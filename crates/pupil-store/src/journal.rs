//! Migration journal writer.
//!
//! Appends `MigrationRecord` lines to `{journal_dir}/migrations.jsonl` with
//! `serde_jsonlines::append_json_lines`.

use std::path::{Path, PathBuf};

use pupil_core::journal::MigrationRecord;

use crate::error::StoreError;

/// File name of the journal inside the journal directory.
pub const JOURNAL_FILE: &str = "migrations.jsonl";

/// Appends migration records to a JSONL file.
pub struct JournalWriter {
    journal_dir: PathBuf,
    enabled: bool,
}

impl JournalWriter {
    /// Create a writer for the given directory, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the directory cannot be created.
    pub fn new(journal_dir: PathBuf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&journal_dir).map_err(|e| {
            StoreError::Unavailable(format!("create {}: {e}", journal_dir.display()))
        })?;
        Ok(Self {
            journal_dir,
            enabled: true,
        })
    }

    /// A writer that drops every record.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            journal_dir: PathBuf::new(),
            enabled: false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Path of the journal file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.journal_dir.join(JOURNAL_FILE)
    }

    #[must_use]
    pub fn journal_dir(&self) -> &Path {
        &self.journal_dir
    }

    /// Append one record. No-op when disabled.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Other` if the file write fails.
    pub fn append(&self, record: &MigrationRecord) -> Result<(), StoreError> {
        if !self.enabled {
            return Ok(());
        }
        serde_jsonlines::append_json_lines(self.path(), [record])
            .map_err(|e| StoreError::Other(e.into()))?;
        tracing::debug!(path = %self.path().display(), to_version = record.to_version, "journal record appended");
        Ok(())
    }

    /// Read every record in append order. A missing file yields no records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Other` if the file cannot be read or a line does
    /// not parse.
    pub fn read_all(&self) -> Result<Vec<MigrationRecord>, StoreError> {
        let path = self.path();
        if !self.enabled || !path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&path)
            .map_err(|e| StoreError::Other(e.into()))?
            .collect::<Result<Vec<MigrationRecord>, _>>()
            .map_err(|e| StoreError::Other(e.into()))
    }
}

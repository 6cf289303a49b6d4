//! Storage location configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_document_key() -> String {
    "appData".to_string()
}

fn default_database_file() -> String {
    "pupil.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding the database and journal. Empty means the
    /// platform data directory (`~/.local/share/pupil` on Linux).
    #[serde(default)]
    pub data_dir: String,

    /// Key of the persisted document in the document store.
    #[serde(default = "default_document_key")]
    pub document_key: String,

    /// libSQL database file name inside `data_dir`.
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            document_key: default_document_key(),
            database_file: default_database_file(),
        }
    }
}

impl StorageConfig {
    /// Resolve the data directory, falling back to the platform default.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        if !self.data_dir.is_empty() {
            return PathBuf::from(&self.data_dir);
        }
        dirs::data_dir()
            .map(|p| p.join("pupil"))
            .unwrap_or_else(|| PathBuf::from(".pupil"))
    }

    /// Full path of the libSQL database file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.resolved_data_dir().join(&self.database_file)
    }

    /// Directory for the migration journal.
    #[must_use]
    pub fn journal_dir(&self) -> PathBuf {
        self.resolved_data_dir().join("journal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert!(config.data_dir.is_empty());
        assert_eq!(config.document_key, "appData");
        assert_eq!(config.database_file, "pupil.db");
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = StorageConfig {
            data_dir: "/tmp/pupil-test".into(),
            ..StorageConfig::default()
        };
        assert_eq!(
            config.database_path(),
            PathBuf::from("/tmp/pupil-test/pupil.db")
        );
        assert_eq!(
            config.journal_dir(),
            PathBuf::from("/tmp/pupil-test/journal")
        );
    }
}

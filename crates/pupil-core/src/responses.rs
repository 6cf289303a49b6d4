//! Report and response types returned by the migration and store layers.
//!
//! All of these serialize to JSON for the CLI's `--format json` output.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which startup path the orchestrator took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MigrationPath {
    /// Pre-file-store document: rehydrate inline files, then migrate fields.
    Upgrade,
    /// Current file format: field migrators only.
    Structural,
}

impl MigrationPath {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upgrade => "upgrade",
            Self::Structural => "structural",
        }
    }
}

impl std::fmt::Display for MigrationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one startup migration run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: Option<u32>,
    pub to_version: Option<u32>,
    pub path: MigrationPath,
    pub files_rehydrated: usize,
    pub changed_steps: Vec<String>,
    /// Whether the migrated document was written back to the store.
    pub persisted: bool,
    /// Schema validation messages (empty when the document is valid).
    pub schema_warnings: Vec<String>,
}

impl MigrationReport {
    /// Whether any field migrator changed the document.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.changed_steps.is_empty()
    }

    /// Whether this run was the one-time file-format upgrade.
    #[must_use]
    pub fn upgraded(&self) -> bool {
        self.path == MigrationPath::Upgrade
    }
}

/// Summary of the live document for `pupil status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusResponse {
    pub version: Option<u32>,
    pub students: usize,
    pub classes: usize,
    pub monitoring_docs: usize,
    pub teacher: Option<String>,
    pub blobs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DownloadResponse {
    pub id: String,
    pub path: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BackupResponse {
    pub path: String,
    pub files: usize,
    pub missing_files: Vec<String>,
}

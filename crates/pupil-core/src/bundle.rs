//! Full-backup bundle.
//!
//! The bundle carries the whole document plus the content of every file it
//! references, so it can be restored into an empty store.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `dataType` discriminator of a full backup.
pub const FULL_BACKUP: &str = "fullBackup";

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupBundle {
    pub data_type: String,
    /// The document as persisted. Kept untyped so that older documents
    /// survive a round trip and are migrated on the next start.
    pub app_data: serde_json::Value,
    /// File content keyed by file-reference ID.
    pub files: BTreeMap<String, String>,
}

impl BackupBundle {
    #[must_use]
    pub fn full(app_data: serde_json::Value, files: BTreeMap<String, String>) -> Self {
        Self {
            data_type: FULL_BACKUP.to_string(),
            app_data,
            files,
        }
    }

    #[must_use]
    pub fn is_full_backup(&self) -> bool {
        self.data_type == FULL_BACKUP
    }
}

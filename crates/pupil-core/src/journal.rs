//! Migration journal record.
//!
//! Every persisted migration run appends one `MigrationRecord` line to the
//! journal JSONL file. The `v` field versions the record envelope itself;
//! records without it deserialize with `v == 1`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::responses::MigrationPath;

const fn default_record_version() -> u32 {
    1
}

/// One persisted migration run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MigrationRecord {
    /// Record envelope version.
    #[serde(default = "default_record_version")]
    pub v: u32,

    /// RFC 3339 timestamp of the run.
    pub ts: String,

    /// Document version before the run (`None` when the field was absent).
    pub from_version: Option<u32>,

    /// Document version persisted by the run.
    pub to_version: u32,

    pub path: MigrationPath,

    /// Number of inline files moved into the blob store.
    pub files_rehydrated: usize,

    /// Names of the field migrators that reported a change, in run order.
    pub changed_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_default_version() {
        let json = r#"{"ts":"2026-01-01T00:00:00Z","from_version":null,"to_version":2,"path":"upgrade","files_rehydrated":3,"changed_steps":["students"]}"#;
        let record: MigrationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.v, 1);
        assert_eq!(record.path, MigrationPath::Upgrade);
        assert_eq!(record.files_rehydrated, 3);
    }
}

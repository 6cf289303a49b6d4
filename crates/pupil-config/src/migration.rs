//! Startup migration behaviour.

use serde::{Deserialize, Serialize};

const fn default_journal() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MigrationConfig {
    /// Abort startup when the migrated document fails schema validation.
    /// When false, violations are logged and the document is still used.
    #[serde(default)]
    pub strict_schema: bool,

    /// Append a record to the migration journal whenever a migration is saved.
    #[serde(default = "default_journal")]
    pub journal: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            strict_schema: false,
            journal: default_journal(),
        }
    }
}

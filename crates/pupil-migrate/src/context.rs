//! Per-run migration context: the ID source and the migration clock.

use chrono::{SecondsFormat, Utc};
use pupil_core::errors::CoreError;
use pupil_core::ids::{IdSource, RandomIds};

/// Everything a migrator may need beyond the value it transforms.
///
/// Migrators mint IDs and read "now" only through this context so that a run
/// is reproducible when given a deterministic source and a fixed clock.
pub struct MigrationContext {
    ids: Box<dyn IdSource + Send>,
    now: String,
}

impl MigrationContext {
    pub fn new(ids: impl IdSource + Send + 'static, now: impl Into<String>) -> Self {
        Self {
            ids: Box::new(ids),
            now: now.into(),
        }
    }

    /// Random v4 IDs and the current wall-clock time.
    #[must_use]
    pub fn live() -> Self {
        Self::new(RandomIds, timestamp_now())
    }

    /// Mint a fresh `{prefix}-…` ID.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Entropy` if the ID source fails.
    pub fn next_id(&mut self, prefix: &str) -> Result<String, CoreError> {
        self.ids.next_id(prefix)
    }

    /// The run's timestamp, RFC 3339 with milliseconds and a `Z` suffix.
    #[must_use]
    pub fn now(&self) -> &str {
        &self.now
    }
}

/// Current UTC time as `2024-05-01T09:30:00.000Z`.
#[must_use]
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

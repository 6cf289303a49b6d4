//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default target directory for `pupil download`. Empty means the
    /// current directory.
    #[serde(default)]
    pub download_dir: String,
}

impl GeneralConfig {
    #[must_use]
    pub fn resolved_download_dir(&self) -> PathBuf {
        if self.download_dir.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(&self.download_dir)
        }
    }
}

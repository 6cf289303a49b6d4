//! # pupil-config
//!
//! Layered configuration loading for Pupil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PUPIL_*` prefix, `__` as separator)
//! 2. Project-level `.pupil/config.toml`
//! 3. User-level `~/.config/pupil/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PUPIL_STORAGE__DATA_DIR` -> `storage.data_dir`,
//! `PUPIL_MIGRATION__STRICT_SCHEMA` -> `migration.strict_schema`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use pupil_config::PupilConfig;
//!
//! let config = PupilConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.storage.database_path().display());
//! ```

mod error;
mod general;
mod migration;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use migration::MigrationConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PupilConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl PupilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".pupil/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PUPIL_").split("__"))
    }

    /// Reject values that would make the store unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.document_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.document_key".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.database_file".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pupil").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = PupilConfig::default();
        assert!(!config.migration.strict_schema);
        assert!(config.migration.journal);
        assert_eq!(config.storage.document_key, "appData");
        assert!(config.general.download_dir.is_empty());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: PupilConfig = PupilConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.storage.database_file, "pupil.db");
    }

    #[test]
    fn empty_document_key_is_invalid() {
        let mut config = PupilConfig::default();
        config.storage.document_key = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "storage.document_key"
        ));
    }
}

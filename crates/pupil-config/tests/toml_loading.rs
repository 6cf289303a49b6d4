//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pupil_config::PupilConfig;

#[test]
fn loads_storage_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
data_dir = "/srv/pupil"
document_key = "records"
"#,
        )?;

        let config: PupilConfig = Figment::from(Serialized::defaults(PupilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.data_dir, "/srv/pupil");
        assert_eq!(config.storage.document_key, "records");
        assert_eq!(config.storage.database_file, "pupil.db");
        Ok(())
    });
}

#[test]
fn loads_migration_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[migration]
strict_schema = true
journal = false
"#,
        )?;

        let config: PupilConfig = Figment::from(Serialized::defaults(PupilConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.migration.strict_schema);
        assert!(!config.migration.journal);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
data_dir = "/from/toml"
"#,
        )?;
        jail.set_env("PUPIL_STORAGE__DATA_DIR", "/from/env");
        jail.set_env("PUPIL_MIGRATION__STRICT_SCHEMA", "true");

        let config: PupilConfig = Figment::from(Serialized::defaults(PupilConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PUPIL_").split("__"))
            .extract()?;

        assert_eq!(config.storage.data_dir, "/from/env");
        assert!(config.migration.strict_schema);
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".pupil")?;
        jail.create_file(
            ".pupil/config.toml",
            r#"
[general]
download_dir = "downloads"
"#,
        )?;

        let config = PupilConfig::load().expect("config loads");
        assert_eq!(config.general.download_dir, "downloads");
        Ok(())
    });
}

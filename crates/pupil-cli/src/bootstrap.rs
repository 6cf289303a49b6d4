use std::path::Path;

use anyhow::Context;
use pupil_config::PupilConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PupilConfig> {
    load_dotenv()?;
    let mut config = PupilConfig::load().context("failed to load pupil configuration")?;
    if let Some(data_dir) = &flags.data_dir {
        config.storage.data_dir.clone_from(data_dir);
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    let env_path = Path::new(".env");
    if env_path.exists() {
        dotenvy::from_path(env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}

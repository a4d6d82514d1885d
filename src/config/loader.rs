// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read and deserialize a registry file without semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    debug!(
        path = %path.display(),
        jobs = config.job.len(),
        runs = config.run.len(),
        "registry file parsed"
    );

    Ok(config)
}

/// Read, deserialize and validate a registry file.
///
/// This is the entry point the rest of the crate uses; see
/// `config::validate` for the checks applied.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// `Triggers.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Triggers.toml")
}

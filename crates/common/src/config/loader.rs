use crate::config::error::ConfigError;
use crate::config::GcliConfig;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".gcli.yml";

/// `$HOME/.gcli.yml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

/// Load the CLI config file.
///
/// An explicit path must exist. Without one the default location is tried and
/// silently skipped when absent.
pub fn read_config(config_path: Option<&Path>) -> Result<Option<GcliConfig>, ConfigError> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::missing_file(path));
            }
            load_config(path).map(Some)
        }
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config(&path).map(Some),
            _ => Ok(None),
        },
    }
}

pub fn load_config(path: &Path) -> Result<GcliConfig, ConfigError> {
    debug!("loading cli config from {}", path.display());
    let raw = fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(GcliConfig::default());
    }
    let config: GcliConfig = serde_yaml::from_str(&raw)?;
    Ok(config)
}

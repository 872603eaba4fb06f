//! Configuration loading from file system

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use super::defaults::DEFAULT_CONFIG_PATH;
use super::types::Config;
use crate::error::{Result, ShortcutError};

/// Read and parse a config file, reporting every failure.
pub fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str::<Config>(&contents).map_err(|e| ShortcutError::Config {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load configuration from `path`.
///
/// Returns Config::default() if the file is missing or cannot be parsed.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Config::default();
    }

    match read_config(path) {
        Ok(config) => {
            info!("Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    }
}

/// Load configuration from ~/.config/shortcut-engine/config.json
pub fn load_default_config() -> Config {
    let path = PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref());
    load_config(&path)
}

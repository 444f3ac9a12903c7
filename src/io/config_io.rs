//! Configuration loading.
//!
//! Looks for `taskflow.toml` in the current directory; a missing file is not
//! an error and yields the defaults. A present-but-broken file is always
//! reported, never silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::model::config::AppConfig;

pub const CONFIG_FILE: &str = "taskflow.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load the config file from `dir`, falling back to defaults when absent.
pub fn load_config(dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

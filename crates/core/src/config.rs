//! Configuration loading for the overlay.
//!
//! One small TOML file (`quickbar.toml`). A missing file is not an error:
//! the defaults are good enough to run with.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Overlay configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Placeholder text shown while the input field is empty.
    pub placeholder: String,

    /// Delay before the proactive focus grab after startup, in
    /// milliseconds.
    pub focus_delay_ms: u64,

    /// Make the demo host refuse every message.
    pub reject_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            placeholder: "Type your task...".to_string(),
            focus_delay_ms: 50,
            reject_all: false,
        }
    }
}

/// Load configuration from the given path.
///
/// Returns the defaults if the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or has
/// invalid TOML.
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

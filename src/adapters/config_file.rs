//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] by reading a `SystemConfig` from the file
//! named by the `NEUROSYNC_CONFIG` environment variable.  Missing fields
//! take their defaults; the result is validated before it is returned.

use std::path::{Path, PathBuf};

use log::info;

use crate::app::ports::ConfigPort;
use crate::config::SystemConfig;
use crate::error::ConfigError;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "NEUROSYNC_CONFIG";

pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Path from [`CONFIG_ENV`]; no variable means no stored config.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Parse and validate a JSON document.
pub fn parse(json: &str) -> Result<SystemConfig, ConfigError> {
    let config: SystemConfig = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
    config.validate()?;
    Ok(config)
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NotFound)?;
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config = parse(&json)?;
        info!("CONFIG | loaded {}", path.display());
        Ok(config)
    }
}

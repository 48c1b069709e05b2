//! TOML-based application configuration.
//!
//! Stored at `~/.config/lifeos/config.toml`. Absent file means defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

fn default_server_addr() -> String {
    "127.0.0.1:5001".to_string()
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override for the SQLite database location.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    /// Bind address for the HTTP server.
    #[serde(default = "default_server_addr")]
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            server_addr: default_server_addr(),
        }
    }
}

impl Config {
    fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Persist the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        let raw =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Resolved database path (override or default under the data dir).
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("lifeos.db")),
        }
    }
}

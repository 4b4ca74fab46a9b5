//! Configuration management.

use crate::error::{LinkmonError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Persistent configuration for the collector daemon.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP API binds to.
    pub listen_addr: String,
    pub log_level: String,
    pub data_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            log_level: "info".to_string(),
            data_dir: paths::data_dir().to_string_lossy().to_string(),
        }
    }
}

impl Config {
    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        paths::config_dir().join("config.json")
    }

    /// Load configuration from disk.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| LinkmonError::InvalidConfig {
            reason: format!("Failed to read config: {}", e),
        })?;
        serde_json::from_str(&content).map_err(|e| LinkmonError::InvalidConfig {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LinkmonError::Io { path: parent.to_path_buf(), source: e })?;
        }
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            LinkmonError::InvalidConfig { reason: format!("Failed to serialize config: {}", e) }
        })?;
        std::fs::write(&path, content).map_err(|e| LinkmonError::Io { path, source: e })
    }
}

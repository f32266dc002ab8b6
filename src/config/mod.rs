//! Exporter configuration.
//!
//! Defaults match the container deployment: the client exporter on port
//! 9191, the uptime exporter on port 9393 reading the host's bind-mounted
//! `/proc/uptime`. A TOML file may override any key; CLI flags are applied
//! on top by the binary.

use crate::exporter::{ClientCollector, UptimeCollector, DEFAULT_UPTIME_PATH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {0} port (must be 1-65535)")]
    InvalidPort(&'static str),
    #[error("uptime path must not be empty")]
    EmptyUptimePath,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Settings for the simulated client exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Listen port.
    pub port: u16,
    /// Value of the `host` label.
    pub host_label: String,
    /// Value of the `app` label.
    pub app_label: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            port: 9191,
            host_label: "client".to_string(),
            app_label: "my-first-app".to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds the collector described by this config.
    pub fn collector(&self) -> ClientCollector {
        ClientCollector::new(self.host_label.as_str(), self.app_label.as_str())
    }
}

/// Settings for the server uptime exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// File holding the host uptime, `/proc/uptime` format.
    pub uptime_path: PathBuf,
    /// Value of the `host` label.
    pub host_label: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 9393,
            uptime_path: PathBuf::from(DEFAULT_UPTIME_PATH),
            host_label: "server".to_string(),
        }
    }
}

impl ServerConfig {
    /// Builds the collector described by this config.
    pub fn collector(&self) -> UptimeCollector {
        UptimeCollector::new(self.uptime_path.clone(), self.host_label.as_str())
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExporterConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl ExporterConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.port == 0 {
            return Err(ConfigError::InvalidPort("client"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort("server"));
        }
        if self.server.uptime_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyUptimePath);
        }
        Ok(())
    }
}

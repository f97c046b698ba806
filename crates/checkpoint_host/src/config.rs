//! Configuration management for the checkpoint host.
//!
//! Loads the host configuration from a TOML file, creating a default file on
//! first run, and validates the merged result after CLI overrides.

use crate::error::HostError;
use plugin_checkpoint::CheckpointSettings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

fn default_log_level() -> String {
    "info".to_string()
}

/// Host configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plugin settings, passed straight to the checkpoint plugin
    #[serde(default)]
    pub checkpoint: CheckpointSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Which map and script to run
    #[serde(default)]
    pub session: SessionSettings,
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output logs in JSON format
    #[serde(default)]
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

/// Inputs for a simulated session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// World file holding `checkpoint ... end` objects
    #[serde(default)]
    pub map: Option<String>,
    /// JSON-lines session script
    #[serde(default)]
    pub script: Option<String>,
}

impl AppConfig {
    /// Loads configuration from `path`, writing a default file if none exists.
    pub fn load_from_file(path: &Path) -> Result<Self, HostError> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| HostError::io(path, e))?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)?;
            std::fs::write(path, toml_content).map_err(|e| HostError::io(path, e))?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        self.checkpoint.validate()?;

        for (name, value) in [("map", &self.session.map), ("script", &self.session.script)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(format!("session.{name} cannot be empty"));
            }
        }

        Ok(())
    }
}

//! Configuration module for Linewatch
//!
//! Provides layered configuration loading from files, environment variables,
//! and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`LINEWATCH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)

pub mod backend;
pub mod error;
pub mod logging;
pub mod polling;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use polling::PollingConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Linewatch console.
///
/// # Example
///
/// ```rust
/// use linewatch::config::LinewatchConfig;
///
/// let config = LinewatchConfig::default();
/// assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
/// assert_eq!(config.polling.lamp_interval_ms, 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LinewatchConfig {
    /// Inspection backend connection settings
    pub backend: BackendConfig,
    /// Polling cadence per stream
    pub polling: PollingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl LinewatchConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports LINEWATCH_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("LINEWATCH_BASE_URL") {
            self.backend.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(level) = std::env::var("LINEWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LINEWATCH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(live) = std::env::var("LINEWATCH_LIVE_COUNTS") {
            self.polling.use_live_counts = live.to_lowercase() == "true";
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation {
                field: "backend.base_url".to_string(),
                message: "must be an http(s) URL".to_string(),
            });
        }
        if self.backend.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "backend.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        let intervals = [
            ("polling.stats_interval_ms", self.polling.stats_interval_ms),
            (
                "polling.breakdown_interval_ms",
                self.polling.breakdown_interval_ms,
            ),
            (
                "polling.camera_status_interval_ms",
                self.polling.camera_status_interval_ms,
            ),
            ("polling.lamp_interval_ms", self.polling.lamp_interval_ms),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "interval must be non-zero".to_string(),
                });
            }
        }
        Ok(())
    }
}

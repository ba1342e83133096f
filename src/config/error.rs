//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file does not exist
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    /// File could not be read
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid TOML for this schema
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// A field value is out of range or inconsistent
    #[error("invalid configuration: {field}: {message}")]
    Validation { field: String, message: String },
}

//! Inspection backend connection settings.

use serde::{Deserialize, Serialize};

/// Where the inspection backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_seconds: 5,
        }
    }
}

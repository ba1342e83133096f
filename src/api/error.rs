//! Error types for backend requests.

use thiserror::Error;

/// Errors returned by [`crate::api::InspectionApi`] operations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Base URL rejected before any request was made
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Connection failed, timed out, or was interrupted
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-success HTTP status without a usable body
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("invalid response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

//! Error taxonomy for a single poll attempt.

use thiserror::Error;

/// Why a poll attempt produced no payload.
///
/// All variants are swallowed at the poller boundary; the next scheduled tick
/// is the implicit retry.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    /// Network unreachable, connection dropped, or request timed out
    #[error("request failed: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("invalid payload: {0}")]
    Parse(String),

    /// A newer poll for the same stream cancelled this one
    #[error("superseded by a newer request")]
    Superseded,
}

//! Polling cadence per stream.

use serde::{Deserialize, Serialize};

/// Fixed intervals for the dashboard's polling loops.
///
/// The lamp mirrors a physical indicator and polls faster than the counters.
/// There is no backoff or jitter; a missed tick is skipped, never bunched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub stats_interval_ms: u64,
    pub breakdown_interval_ms: u64,
    pub camera_status_interval_ms: u64,
    pub lamp_interval_ms: u64,
    /// Serve the stats stream from `/live_counts` (in-memory counters, no
    /// percentages) instead of the database-backed `/stats`
    pub use_live_counts: bool,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            stats_interval_ms: 2000,
            breakdown_interval_ms: 2000,
            camera_status_interval_ms: 2000,
            lamp_interval_ms: 500,
            use_live_counts: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_matches_the_dashboard() {
        let config = PollingConfig::default();
        assert_eq!(config.stats_interval_ms, 2000);
        assert_eq!(config.breakdown_interval_ms, 2000);
        assert_eq!(config.camera_status_interval_ms, 2000);
        assert_eq!(config.lamp_interval_ms, 500);
        assert!(!config.use_live_counts);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: PollingConfig = toml::from_str("lamp_interval_ms = 250").unwrap();
        assert_eq!(config.lamp_interval_ms, 250);
        assert_eq!(config.stats_interval_ms, 2000);
    }
}

//! HTTP client for the inspection backend.
//!
//! Wraps the backend's endpoint contracts behind typed methods. GET endpoints
//! carry a cache-busting `t` parameter so intermediary caches never serve a
//! stale counter; `/set_cam` and `/reset` parse their JSON body even on error
//! statuses because the backend answers a wrong reset password with 401 plus
//! a `{ok: false}` body.

mod error;
pub mod types;

pub use error::ApiError;

use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use types::{Ack, DefectBreakdown, LampPayload, MetricSnapshot, ResetRequest};

static CACHE_BUST: AtomicU64 = AtomicU64::new(0);

/// Next cache-busting value: current Unix millis, forced strictly increasing
/// so two URLs minted within the same millisecond still differ.
pub fn cache_bust() -> u64 {
    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut prev = CACHE_BUST.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match CACHE_BUST.compare_exchange_weak(prev, next, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

/// Append the cache-busting `t` parameter to a URL.
pub fn cache_busted(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={}", cache_bust())
}

/// Typed client over the inspection backend's HTTP surface.
#[derive(Debug, Clone)]
pub struct InspectionApi {
    client: reqwest::Client,
    base_url: String,
}

impl InspectionApi {
    /// Create a client with a dedicated connection pool and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing `reqwest::Client` (for testing).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Handle to the underlying HTTP client, shared with the poller.
    pub fn client(&self) -> reqwest::Client {
        self.client.clone()
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Database-backed counters with percentages.
    pub async fn stats(&self) -> Result<MetricSnapshot, ApiError> {
        self.get_json("/stats").await
    }

    /// In-memory counters, cheaper than `/stats` but without percentages.
    pub async fn live_counts(&self) -> Result<MetricSnapshot, ApiError> {
        self.get_json("/live_counts").await
    }

    /// Per-defect-class breakdown.
    pub async fn stats_detail(&self) -> Result<DefectBreakdown, ApiError> {
        self.get_json("/stats_detail").await
    }

    /// Virtual lamp state.
    pub async fn lamp_state(&self) -> Result<LampPayload, ApiError> {
        self.get_json("/lamp_state").await
    }

    /// Connectivity of the currently active camera.
    pub async fn camera_status(&self) -> Result<Ack, ApiError> {
        let url = cache_busted(&self.url("/camera_status"));
        let response = self.client.get(&url).send().await?;
        Self::read_ack(response).await
    }

    /// Ask the backend to switch the active camera.
    pub async fn set_cam(&self, index: usize) -> Result<Ack, ApiError> {
        let url = format!("{}/set_cam?i={index}", self.base_url);
        let response = self.client.post(&url).send().await?;
        Self::read_ack(response).await
    }

    /// Two-phase reset: `check_only` validates the key, a second call with
    /// `check_only = false` wipes the database.
    pub async fn reset(&self, key: &str, check_only: bool) -> Result<Ack, ApiError> {
        let response = self
            .client
            .post(self.url("/reset"))
            .json(&ResetRequest { key, check_only })
            .send()
            .await?;
        Self::read_ack(response).await
    }

    /// Fresh cache-busted video stream URL. Minting a new one forces an
    /// already-open stream connection to reconnect after a camera switch.
    pub fn video_feed_url(&self) -> String {
        cache_busted(&self.url("/video_feed"))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = cache_busted(&self.url(path));
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Parse an `{ok, msg?}` body before looking at the status code; the
    /// backend attaches JSON bodies to 401/500 responses as well.
    async fn read_ack(response: reqwest::Response) -> Result<Ack, ApiError> {
        let status = response.status();
        match response.json::<Ack>().await {
            Ok(ack) => Ok(ack),
            Err(_) if !status.is_success() => Err(ApiError::Status(status.as_u16())),
            Err(e) => Err(ApiError::Parse(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_bust_is_strictly_increasing() {
        let first = cache_bust();
        let second = cache_bust();
        let third = cache_bust();
        assert!(second > first);
        assert!(third > second);
    }

    #[test]
    fn cache_busted_picks_the_right_separator() {
        let plain = cache_busted("http://host/stats");
        assert!(plain.starts_with("http://host/stats?t="));
        let with_query = cache_busted("http://host/set_cam?i=1");
        assert!(with_query.starts_with("http://host/set_cam?i=1&t="));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = InspectionApi::with_client(reqwest::Client::new(), "http://host:5000/");
        assert_eq!(api.url("/stats"), "http://host:5000/stats");
    }

    #[test]
    fn video_feed_urls_differ_between_calls() {
        let api = InspectionApi::with_client(reqwest::Client::new(), "http://host:5000");
        assert_ne!(api.video_feed_url(), api.video_feed_url());
    }
}

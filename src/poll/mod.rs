//! Cancellable polling of backend endpoints.
//!
//! One [`Poller`] serves every stream on the dashboard. Each call to
//! [`Poller::poll`] cancels the stream's still-pending predecessor before
//! issuing a new request, so at most one request per stream is in flight and
//! only the most recently initiated, non-superseded response reaches the
//! update callback. Failures never surface to the caller; the next scheduled
//! tick self-heals.

mod error;
mod gate;


pub use error::PollError;
pub use gate::VisibilityGate;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Identifies an independently scheduled polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamId {
    Stats,
    Breakdown,
    Lamp,
    CameraStatus,
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamId::Stats => "stats",
            StreamId::Breakdown => "breakdown",
            StreamId::Lamp => "lamp",
            StreamId::CameraStatus => "camera-status",
        };
        f.write_str(name)
    }
}

/// One in-flight cancellable request.
///
/// Created at the start of a poll tick, removed once the request settles and
/// the handle is still the stream's current one.
#[derive(Debug, Clone)]
struct PollHandle {
    seq: u64,
    token: CancellationToken,
}

/// Issues cancellable requests on behalf of the dashboard's polling loops.
pub struct Poller {
    client: reqwest::Client,
    gate: VisibilityGate,
    in_flight: DashMap<StreamId, PollHandle>,
    next_seq: AtomicU64,
}

impl Poller {
    pub fn new(client: reqwest::Client, gate: VisibilityGate) -> Self {
        Self {
            client,
            gate,
            in_flight: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn gate(&self) -> &VisibilityGate {
        &self.gate
    }

    /// Fetch `url`, parse the JSON body as `T`, and hand it to `on_success`.
    ///
    /// Skipped entirely while the visibility gate is hidden. A still-pending
    /// request for the same stream is cancelled first; if this request is
    /// itself superseded while in flight, its response is discarded even when
    /// the transfer completes. Transport, status, and parse failures are
    /// logged and counted, nothing more.
    pub async fn poll<T, F>(&self, stream: StreamId, url: &str, on_success: F)
    where
        T: DeserializeOwned,
        F: FnOnce(T),
    {
        if !self.gate.is_visible() {
            tracing::trace!(%stream, "skipping poll while hidden");
            return;
        }

        let handle = self.begin(stream);
        match self.fetch::<T>(stream, &handle.token, url).await {
            Ok(_) if handle.token.is_cancelled() => {
                tracing::trace!(%stream, "discarding superseded response");
            }
            Ok(payload) => on_success(payload),
            Err(PollError::Superseded) => {
                tracing::trace!(%stream, "poll superseded");
            }
            Err(err) => {
                metrics::counter!("linewatch_poll_failures_total", "stream" => stream.to_string())
                    .increment(1);
                tracing::debug!(%stream, error = %err, "poll failed");
            }
        }
        self.settle(stream, &handle);
    }

    /// Register a new handle for `stream`, cancelling the previous one.
    fn begin(&self, stream: StreamId) -> PollHandle {
        let handle = PollHandle {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            token: CancellationToken::new(),
        };
        if let Some(previous) = self.in_flight.insert(stream, handle.clone()) {
            previous.token.cancel();
        }
        handle
    }

    /// Drop the in-flight entry if `handle` is still the current one.
    fn settle(&self, stream: StreamId, handle: &PollHandle) {
        self.in_flight
            .remove_if(&stream, |_, current| current.seq == handle.seq);
    }

    async fn fetch<T>(
        &self,
        stream: StreamId,
        token: &CancellationToken,
        url: &str,
    ) -> Result<T, PollError>
    where
        T: DeserializeOwned,
    {
        let url = crate::api::cache_busted(url);
        let started = Instant::now();

        let response = tokio::select! {
            _ = token.cancelled() => return Err(PollError::Superseded),
            response = self.client.get(&url).send() => {
                response.map_err(|e| PollError::Transport(e.to_string()))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status.as_u16()));
        }

        let payload = tokio::select! {
            _ = token.cancelled() => return Err(PollError::Superseded),
            payload = response.json::<T>() => {
                payload.map_err(|e| PollError::Parse(e.to_string()))?
            }
        };

        metrics::histogram!("linewatch_poll_latency_seconds", "stream" => stream.to_string())
            .record(started.elapsed().as_secs_f64());
        Ok(payload)
    }
}

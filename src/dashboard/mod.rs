//! Dashboard controller: owns the polling loops and the update channel.
//!
//! One controller is constructed per console session. `start()` spawns the
//! four polling loops (stats, breakdown, camera status, lamp), all gated by a
//! shared [`VisibilityGate`]; `stop()` cancels them and waits for shutdown.
//! Everything the loops learn is published as [`DashboardUpdate`] events on a
//! broadcast channel, keeping the controller free of any presentation code.

pub mod types;

pub use types::DashboardUpdate;

use crate::api::types::{LampPayload, MetricSnapshot};
use crate::api::{ApiError, InspectionApi};
use crate::camera::{CameraController, CameraSelection};
use crate::config::{LinewatchConfig, PollingConfig};
use crate::poll::{Poller, StreamId, VisibilityGate};
use crate::reset::ResetFlow;
use crate::toast::{Severity, Toast, ToastNotifier};
use crate::view;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Capacity of the update broadcast channel; slow subscribers lag rather than
/// block the polling loops.
const UPDATE_CHANNEL_CAPACITY: usize = 64;

/// Owns the dashboard's polling loops, camera state, and toast queue.
pub struct DashboardController {
    api: InspectionApi,
    poller: Arc<Poller>,
    gate: VisibilityGate,
    polling: PollingConfig,
    camera: Arc<Mutex<CameraController>>,
    toasts: Arc<Mutex<ToastNotifier>>,
    updates: broadcast::Sender<DashboardUpdate>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardController {
    /// Construct a controller; no I/O happens until [`start`](Self::start).
    pub fn new(config: &LinewatchConfig) -> Result<Self, ApiError> {
        let api = InspectionApi::new(
            &config.backend.base_url,
            Duration::from_secs(config.backend.timeout_seconds),
        )?;
        let gate = VisibilityGate::new();
        let poller = Arc::new(Poller::new(api.client(), gate.clone()));
        let camera = Arc::new(Mutex::new(CameraController::new(api.clone())));
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);

        Ok(Self {
            api,
            poller,
            gate,
            polling: config.polling.clone(),
            camera,
            toasts: Arc::new(Mutex::new(ToastNotifier::new())),
            updates,
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
        })
    }

    /// Receiver for dashboard updates. Subscribe before `start()` to observe
    /// the first poll results.
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardUpdate> {
        self.updates.subscribe()
    }

    /// Shared visibility handle; flip it to suspend and resume polling.
    pub fn visibility(&self) -> VisibilityGate {
        self.gate.clone()
    }

    pub fn api(&self) -> &InspectionApi {
        &self.api
    }

    /// Spawn the polling loops. Calling `start` on a running controller is a
    /// no-op.
    pub fn start(&mut self) {
        if !self.tasks.is_empty() {
            return;
        }
        self.cancel = CancellationToken::new();

        self.tasks.push(self.spawn_stats_loop());
        self.tasks.push(self.spawn_breakdown_loop());
        self.tasks.push(self.spawn_lamp_loop());
        self.tasks.push(self.spawn_camera_status_loop());

        tracing::info!(
            stats_ms = self.polling.stats_interval_ms,
            lamp_ms = self.polling.lamp_interval_ms,
            live_counts = self.polling.use_live_counts,
            "dashboard polling started"
        );
    }

    /// Cancel the polling loops and wait for them to finish.
    pub async fn stop(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        self.cancel.cancel();
        futures::future::join_all(self.tasks.drain(..)).await;
        tracing::info!("dashboard polling stopped");
    }

    /// Stop and restart with fresh state: the console rendition of the page
    /// reload that follows a completed reset.
    pub async fn reload(&mut self) {
        self.stop().await;
        self.start();
    }

    /// Switch the active camera and broadcast the resulting selection.
    pub async fn switch_camera(&self, index: usize) -> CameraSelection {
        let selection = {
            let mut camera = self.camera.lock().await;
            camera.switch(index).await.clone()
        };
        let _ = self.updates.send(DashboardUpdate::Camera(selection.clone()));
        selection
    }

    /// A reset flow bound to this controller's backend.
    pub fn reset_flow(&self) -> ResetFlow {
        ResetFlow::new(self.api.clone())
    }

    /// Queue a toast and broadcast it.
    pub async fn notify(&self, message: impl Into<String>, severity: Severity) {
        let toast = {
            let mut toasts = self.toasts.lock().await;
            toasts.notify(message, severity)
        };
        let _ = self.updates.send(DashboardUpdate::Toast(toast));
    }

    /// Toasts still within their lifetime.
    pub async fn visible_toasts(&self) -> Vec<Toast> {
        self.toasts.lock().await.visible()
    }

    fn stats_url(&self) -> String {
        if self.polling.use_live_counts {
            self.api.url("/live_counts")
        } else {
            self.api.url("/stats")
        }
    }

    fn spawn_stats_loop(&self) -> JoinHandle<()> {
        let poller = Arc::clone(&self.poller);
        let updates = self.updates.clone();
        let url = self.stats_url();
        let period = Duration::from_millis(self.polling.stats_interval_ms);

        spawn_loop(self.cancel.clone(), period, move || {
            let poller = Arc::clone(&poller);
            let updates = updates.clone();
            let url = url.clone();
            async move {
                let sink = updates.clone();
                poller
                    .poll(StreamId::Stats, &url, move |snapshot: MetricSnapshot| {
                        let _ = sink.send(DashboardUpdate::Stats {
                            view: view::render_stats(&snapshot),
                            at: view::clock_label(chrono::Local::now()),
                        });
                    })
                    .await;
            }
        })
    }

    fn spawn_breakdown_loop(&self) -> JoinHandle<()> {
        let poller = Arc::clone(&self.poller);
        let updates = self.updates.clone();
        let url = self.api.url("/stats_detail");
        let period = Duration::from_millis(self.polling.breakdown_interval_ms);

        spawn_loop(self.cancel.clone(), period, move || {
            let poller = Arc::clone(&poller);
            let updates = updates.clone();
            let url = url.clone();
            async move {
                let sink = updates.clone();
                poller
                    .poll(
                        StreamId::Breakdown,
                        &url,
                        move |breakdown: crate::api::types::DefectBreakdown| {
                            let _ = sink.send(DashboardUpdate::Breakdown {
                                view: view::render_breakdown(&breakdown),
                                at: view::clock_label(chrono::Local::now()),
                            });
                        },
                    )
                    .await;
            }
        })
    }

    fn spawn_lamp_loop(&self) -> JoinHandle<()> {
        let poller = Arc::clone(&self.poller);
        let updates = self.updates.clone();
        let url = self.api.url("/lamp_state");
        let period = Duration::from_millis(self.polling.lamp_interval_ms);

        spawn_loop(self.cancel.clone(), period, move || {
            let poller = Arc::clone(&poller);
            let updates = updates.clone();
            let url = url.clone();
            async move {
                let sink = updates.clone();
                poller
                    .poll(StreamId::Lamp, &url, move |payload: LampPayload| {
                        let _ = sink.send(DashboardUpdate::Lamp(view::lamp_on(&payload)));
                    })
                    .await;
            }
        })
    }

    /// The camera status loop is fire-and-forget: no cancellation tracking,
    /// just the visibility gate.
    fn spawn_camera_status_loop(&self) -> JoinHandle<()> {
        let camera = Arc::clone(&self.camera);
        let gate = self.gate.clone();
        let updates = self.updates.clone();
        let period = Duration::from_millis(self.polling.camera_status_interval_ms);

        spawn_loop(self.cancel.clone(), period, move || {
            let camera = Arc::clone(&camera);
            let gate = gate.clone();
            let updates = updates.clone();
            async move {
                if !gate.is_visible() {
                    return;
                }
                let selection = {
                    let mut camera = camera.lock().await;
                    camera.refresh_status().await.clone()
                };
                let _ = updates.send(DashboardUpdate::Camera(selection));
            }
        })
    }
}

/// Fixed-interval loop with skip-on-miss ticks, terminated by `cancel`.
fn spawn_loop<F, Fut>(cancel: CancellationToken, period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => tick().await,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn construction_does_no_io() {
        let config = LinewatchConfig::default();
        let controller = DashboardController::new(&config).unwrap();
        assert!(controller.visibility().is_visible());
        assert!(controller.visible_toasts().await.is_empty());
    }

    #[tokio::test]
    async fn notify_broadcasts_the_toast() {
        let config = LinewatchConfig::default();
        let controller = DashboardController::new(&config).unwrap();
        let mut updates = controller.subscribe();

        controller.notify("saved", Severity::Success).await;

        match updates.recv().await.unwrap() {
            DashboardUpdate::Toast(toast) => {
                assert_eq!(toast.message, "saved");
                assert_eq!(toast.severity, Severity::Success);
            }
            other => panic!("expected Toast, got: {other:?}"),
        }
        assert_eq!(controller.visible_toasts().await.len(), 1);
    }

    #[tokio::test]
    async fn stop_without_start_is_a_no_op() {
        let config = LinewatchConfig::default();
        let mut controller = DashboardController::new(&config).unwrap();
        controller.stop().await;
    }

    #[test]
    fn stats_url_honors_live_counts_flag() {
        let mut config = LinewatchConfig::default();
        let controller = DashboardController::new(&config).unwrap();
        assert!(controller.stats_url().ends_with("/stats"));

        config.polling.use_live_counts = true;
        let controller = DashboardController::new(&config).unwrap();
        assert!(controller.stats_url().ends_with("/live_counts"));
    }
}

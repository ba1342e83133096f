//! Camera switching and connectivity monitoring.


use crate::api::InspectionApi;
use crate::view::StatusSeverity;
use serde::Serialize;

/// Fallback status when the backend acknowledged the switch without a message.
pub const STATUS_CONNECTED: &str = "Connected";
/// Fallback status when the backend rejected the switch or reports no camera.
pub const STATUS_DISCONNECTED: &str = "Disconnected";
/// Status when the backend could not be reached at all.
pub const STATUS_UNREACHABLE: &str = "Server unreachable";

/// The active camera plus everything a surface shows about it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraSelection {
    /// 0-based camera index; exactly one is active at a time
    pub active: usize,
    /// 1-based human label, e.g. `CAM 1`
    pub label: String,
    pub status: String,
    pub severity: StatusSeverity,
    /// Current video stream source URL
    pub video_url: String,
}

impl CameraSelection {
    fn initial(api: &InspectionApi) -> Self {
        Self {
            active: 0,
            label: "CAM 1".to_string(),
            status: String::new(),
            severity: StatusSeverity::Ok,
            video_url: api.video_feed_url(),
        }
    }
}

/// Drives `/set_cam` and `/camera_status` and tracks the resulting selection.
#[derive(Debug)]
pub struct CameraController {
    api: InspectionApi,
    selection: CameraSelection,
}

impl CameraController {
    pub fn new(api: InspectionApi) -> Self {
        let selection = CameraSelection::initial(&api);
        Self { api, selection }
    }

    pub fn selection(&self) -> &CameraSelection {
        &self.selection
    }

    /// Activate camera `index` and ask the backend to switch to it.
    ///
    /// The new selection is active immediately, deactivating the previous one,
    /// and stays active even if the backend then rejects the switch. On
    /// success the video source gets a fresh cache-busted URL; a stream
    /// connection that is already open never learns about the switch
    /// otherwise.
    pub async fn switch(&mut self, index: usize) -> &CameraSelection {
        self.selection.active = index;
        match self.api.set_cam(index).await {
            Ok(ack) if ack.ok => {
                self.selection.label = format!("CAM {}", index + 1);
                self.selection.status = ack.msg.unwrap_or_else(|| STATUS_CONNECTED.to_string());
                self.selection.severity = StatusSeverity::Ok;
                self.selection.video_url = self.api.video_feed_url();
            }
            Ok(ack) => {
                self.selection.status = ack.msg.unwrap_or_else(|| STATUS_DISCONNECTED.to_string());
                self.selection.severity = StatusSeverity::Error;
            }
            Err(err) => {
                tracing::warn!(index, error = %err, "camera switch failed");
                self.selection.status = STATUS_UNREACHABLE.to_string();
                self.selection.severity = StatusSeverity::Error;
            }
        }
        &self.selection
    }

    /// Fire-and-forget connectivity poll.
    ///
    /// No cancellation tracking: overlapping calls are tolerated because this
    /// only ever rewrites the status message and severity.
    pub async fn refresh_status(&mut self) -> &CameraSelection {
        match self.api.camera_status().await {
            Ok(ack) if ack.ok => {
                self.selection.status = ack.msg.unwrap_or_default();
                self.selection.severity = StatusSeverity::Ok;
            }
            Ok(ack) => {
                self.selection.status = ack.msg.unwrap_or_else(|| STATUS_DISCONNECTED.to_string());
                self.selection.severity = StatusSeverity::Error;
            }
            Err(err) => {
                tracing::debug!(error = %err, "camera status poll failed");
                self.selection.status = STATUS_UNREACHABLE.to_string();
                self.selection.severity = StatusSeverity::Error;
            }
        }
        &self.selection
    }
}

//! Typed updates broadcast to dashboard surfaces.

use crate::camera::CameraSelection;
use crate::toast::Toast;
use crate::view::{BreakdownView, StatsView};

/// One update on the dashboard broadcast channel.
///
/// Surfaces (the CLI watch loop, tests) subscribe and render these; the
/// controller never touches a surface directly.
#[derive(Debug, Clone)]
pub enum DashboardUpdate {
    /// Fresh counters; `at` is the `HH:MM:SS` last-update label
    Stats { view: StatsView, at: String },
    /// Fresh defect breakdown
    Breakdown { view: BreakdownView, at: String },
    /// Virtual lamp indicator state
    Lamp(bool),
    /// Camera selection or connectivity changed
    Camera(CameraSelection),
    /// A notification was queued
    Toast(Toast),
}

//! Pure payload-to-view transforms.
//!
//! Everything in this module is a total function from a wire payload to a
//! renderable view-model; no I/O, no surface mutation. Presentation layers
//! (the CLI watch loop, tests) consume the view-models.

#[cfg(test)]
mod tests;

use crate::api::types::{DefectBreakdown, LampPayload, MetricSnapshot};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Status color for a healthy camera connection.
pub const COLOR_OK: &str = "#7CFC00";
/// Status color for a lost camera connection.
pub const COLOR_ERROR: &str = "#ff4444";

/// Bar chart labels, in the order the dashboard always shows them.
pub const BREAKDOWN_LABELS: [&str; 3] = ["Touching Characters", "Double Print", "Missing Text"];

/// Severity of a connectivity status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSeverity {
    Ok,
    Error,
}

impl StatusSeverity {
    pub const fn color(self) -> &'static str {
        match self {
            StatusSeverity::Ok => COLOR_OK,
            StatusSeverity::Error => COLOR_ERROR,
        }
    }
}

/// Renderable counter view: texts plus the overall pie dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    pub good: u64,
    pub defect: u64,
    /// e.g. `"97.64%"`
    pub percent_good: String,
    pub percent_defect: String,
    /// `[good, defect]`, the doughnut chart dataset
    pub pie: [u64; 2],
}

/// Renderable defect breakdown: fixed label order plus the bar dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownView {
    pub labels: [&'static str; 3],
    pub counts: [u64; 3],
}

/// Format a percentage rounded to two decimal places, without the `%` sign.
pub fn format_percent(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.2}")
}

pub fn render_stats(snapshot: &MetricSnapshot) -> StatsView {
    StatsView {
        good: snapshot.good,
        defect: snapshot.defect,
        percent_good: format!("{}%", format_percent(snapshot.percent_good)),
        percent_defect: format!("{}%", format_percent(snapshot.percent_defect)),
        pie: [snapshot.good, snapshot.defect],
    }
}

/// Breakdown counts in [`BREAKDOWN_LABELS`] order, whatever order the payload
/// keys arrived in.
pub fn render_breakdown(breakdown: &DefectBreakdown) -> BreakdownView {
    BreakdownView {
        labels: BREAKDOWN_LABELS,
        counts: [
            breakdown.touching_characters,
            breakdown.double_print,
            breakdown.missing_text,
        ],
    }
}

/// Whether the virtual lamp indicator is lit.
pub fn lamp_on(payload: &LampPayload) -> bool {
    truthy(&payload.lamp)
}

/// JavaScript truthiness over a JSON value: `null`, `false`, `0`, and `""`
/// are false; everything else, including empty arrays and objects, is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `HH:MM:SS` label for the last-update field.
pub fn clock_label<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format("%H:%M:%S").to_string()
}

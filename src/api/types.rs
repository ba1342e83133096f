//! Wire types for the inspection backend endpoints.

use serde::{Deserialize, Serialize};

/// Counter snapshot returned by `/stats` and `/live_counts`.
///
/// `/live_counts` serves the in-memory counters only; the percent fields are
/// present on the database-backed `/stats` response. Absent fields default to
/// zero so a partial payload still renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSnapshot {
    pub good: u64,
    pub defect: u64,
    pub percent_good: f64,
    pub percent_defect: f64,
}

/// Per-defect-class counts returned by `/stats_detail`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectBreakdown {
    #[serde(rename = "Touching_Characters")]
    pub touching_characters: u64,
    #[serde(rename = "Double_Print")]
    pub double_print: u64,
    #[serde(rename = "Missing_Text")]
    pub missing_text: u64,
}

/// Raw `/lamp_state` payload.
///
/// The backend does not commit to a type for `lamp`; the value is coerced to a
/// boolean by [`crate::view::lamp_on`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LampPayload {
    pub lamp: serde_json::Value,
}

/// Acknowledgement body shared by `/set_cam`, `/camera_status`, and `/reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub ok: bool,
    pub msg: Option<String>,
}

/// Request body for the two-phase `/reset` endpoint.
///
/// No `Debug` impl: the key must never end up in log output.
#[derive(Serialize)]
pub struct ResetRequest<'a> {
    pub key: &'a str,
    #[serde(rename = "checkOnly")]
    pub check_only: bool,
}

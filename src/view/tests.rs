//! Unit tests for the view transforms.

use super::*;
use crate::api::types::{DefectBreakdown, LampPayload, MetricSnapshot};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn format_percent_rounds_to_two_decimals() {
    assert_eq!(format_percent(0.12345), "0.12");
    assert_eq!(format_percent(100.0), "100.00");
    assert_eq!(format_percent(2.345), "2.35");
    assert_eq!(format_percent(0.0), "0.00");
}

#[test]
fn format_percent_tolerates_non_finite_input() {
    assert_eq!(format_percent(f64::NAN), "0.00");
    assert_eq!(format_percent(f64::INFINITY), "0.00");
}

#[test]
fn stats_view_from_full_snapshot() {
    let snapshot = MetricSnapshot {
        good: 124,
        defect: 3,
        percent_good: 97.637,
        percent_defect: 2.363,
    };
    let view = render_stats(&snapshot);
    assert_eq!(view.good, 124);
    assert_eq!(view.defect, 3);
    assert_eq!(view.percent_good, "97.64%");
    assert_eq!(view.percent_defect, "2.36%");
    assert_eq!(view.pie, [124, 3]);
}

#[test]
fn stats_view_renders_zero_for_absent_counters() {
    let snapshot: MetricSnapshot = serde_json::from_str("{}").unwrap();
    let view = render_stats(&snapshot);
    assert_eq!(view.good, 0);
    assert_eq!(view.defect, 0);
    assert_eq!(view.percent_good, "0.00%");
    assert_eq!(view.pie, [0, 0]);
}

#[test]
fn breakdown_label_order_is_fixed_regardless_of_key_order() {
    let shuffled: DefectBreakdown = serde_json::from_value(json!({
        "Missing_Text": 5,
        "Touching_Characters": 1,
        "Double_Print": 3
    }))
    .unwrap();
    let view = render_breakdown(&shuffled);
    assert_eq!(
        view.labels,
        ["Touching Characters", "Double Print", "Missing Text"]
    );
    assert_eq!(view.counts, [1, 3, 5]);
}

#[test]
fn breakdown_defaults_missing_classes_to_zero() {
    let partial: DefectBreakdown = serde_json::from_value(json!({"Double_Print": 2})).unwrap();
    assert_eq!(render_breakdown(&partial).counts, [0, 2, 0]);
}

#[test]
fn truthiness_matches_javascript() {
    assert!(!truthy(&json!(null)));
    assert!(!truthy(&json!(false)));
    assert!(!truthy(&json!(0)));
    assert!(!truthy(&json!(0.0)));
    assert!(!truthy(&json!("")));
    assert!(truthy(&json!(true)));
    assert!(truthy(&json!(1)));
    assert!(truthy(&json!(-3.5)));
    assert!(truthy(&json!("0")));
    assert!(truthy(&json!("off")));
    assert!(truthy(&json!([])));
    assert!(truthy(&json!({})));
}

#[test]
fn lamp_coerces_payload_to_bool() {
    let on: LampPayload = serde_json::from_value(json!({"lamp": 1})).unwrap();
    assert!(lamp_on(&on));
    let off: LampPayload = serde_json::from_value(json!({"lamp": false})).unwrap();
    assert!(!lamp_on(&off));
    let absent: LampPayload = serde_json::from_value(json!({})).unwrap();
    assert!(!lamp_on(&absent));
}

#[test]
fn status_severity_maps_to_distinct_colors() {
    assert_eq!(StatusSeverity::Ok.color(), COLOR_OK);
    assert_eq!(StatusSeverity::Error.color(), COLOR_ERROR);
    assert_ne!(StatusSeverity::Ok.color(), StatusSeverity::Error.color());
}

#[test]
fn clock_label_is_hours_minutes_seconds() {
    let at = chrono::Utc.with_ymd_and_hms(2024, 5, 17, 9, 5, 3).unwrap();
    assert_eq!(clock_label(at), "09:05:03");
}

proptest! {
    #[test]
    fn format_percent_always_has_two_decimals(value in -10_000.0f64..10_000.0) {
        let formatted = format_percent(value);
        let dot = formatted.rfind('.').unwrap();
        prop_assert_eq!(formatted.len() - dot - 1, 2);
    }

    #[test]
    fn render_stats_is_total_over_any_counters(good in any::<u64>(), defect in any::<u64>()) {
        let view = render_stats(&MetricSnapshot { good, defect, ..Default::default() });
        prop_assert_eq!(view.pie, [good, defect]);
    }
}

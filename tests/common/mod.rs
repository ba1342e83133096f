//! Shared helpers for integration tests: a mock inspection backend.

#![allow(dead_code)]

use linewatch::config::LinewatchConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration pointed at `server` with intervals short enough for tests.
pub fn test_config(server: &MockServer) -> LinewatchConfig {
    let mut config = LinewatchConfig::default();
    config.backend.base_url = server.uri();
    config.polling.stats_interval_ms = 50;
    config.polling.breakdown_interval_ms = 50;
    config.polling.camera_status_interval_ms = 50;
    config.polling.lamp_interval_ms = 25;
    config
}

pub async fn mount_stats(server: &MockServer, good: u64, defect: u64) {
    let total = (good + defect).max(1) as f64;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "good": good,
            "defect": defect,
            "percent_good": good as f64 / total * 100.0,
            "percent_defect": defect as f64 / total * 100.0,
        })))
        .mount(server)
        .await;
}

pub async fn mount_breakdown(server: &MockServer, touching: u64, double: u64, missing: u64) {
    Mock::given(method("GET"))
        .and(path("/stats_detail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Touching_Characters": touching,
            "Double_Print": double,
            "Missing_Text": missing,
        })))
        .mount(server)
        .await;
}

pub async fn mount_lamp(server: &MockServer, lamp: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/lamp_state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"lamp": lamp})))
        .mount(server)
        .await;
}

pub async fn mount_camera_status(server: &MockServer, ok: bool, msg: &str) {
    Mock::given(method("GET"))
        .and(path("/camera_status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": ok, "msg": msg})),
        )
        .mount(server)
        .await;
}

pub async fn mount_set_cam(server: &MockServer, ok: bool, msg: &str) {
    Mock::given(method("POST"))
        .and(path("/set_cam"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"ok": ok, "msg": msg})),
        )
        .mount(server)
        .await;
}

/// Mount both phases of `/reset` for the given key: check answers `ok`,
/// execute wipes successfully.
pub async fn mount_reset(server: &MockServer, key: &str) {
    Mock::given(method("POST"))
        .and(path("/reset"))
        .and(wiremock::matchers::body_json(serde_json::json!({
            "key": key, "checkOnly": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reset"))
        .and(wiremock::matchers::body_json(serde_json::json!({
            "key": key, "checkOnly": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true, "deleted_rows": 7, "deleted_images": 7
        })))
        .mount(server)
        .await;
}

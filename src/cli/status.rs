//! One-shot `stats` and `camera` command handlers.

use super::{CameraStatusArgs, CameraSwitchArgs, StatsArgs};
use crate::api::InspectionApi;
use crate::camera::CameraController;
use crate::config::LinewatchConfig;
use crate::view::{self, StatusSeverity};
use colored::Colorize;
use comfy_table::Table;
use std::time::Duration;

fn api_from(config: &LinewatchConfig) -> anyhow::Result<InspectionApi> {
    Ok(InspectionApi::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_seconds),
    )?)
}

/// Manual refresh: fetch counters and breakdown once and render them.
pub async fn handle_stats(args: &StatsArgs) -> anyhow::Result<String> {
    let config = super::load_config(&args.config, args.url.as_deref())?;
    let api = api_from(&config)?;

    let snapshot = api.stats().await?;
    let breakdown = api.stats_detail().await?;
    let stats = view::render_stats(&snapshot);
    let detail = view::render_breakdown(&breakdown);

    if args.json {
        return Ok(serde_json::to_string_pretty(&serde_json::json!({
            "stats": stats,
            "breakdown": detail,
        }))?);
    }

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Good".to_string(), stats.good.to_string()]);
    table.add_row(vec!["Defect".to_string(), stats.defect.to_string()]);
    table.add_row(vec!["Good %".to_string(), stats.percent_good.clone()]);
    table.add_row(vec!["Defect %".to_string(), stats.percent_defect.clone()]);
    for (label, count) in detail.labels.iter().zip(detail.counts.iter()) {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    Ok(table.to_string())
}

/// Switch the active camera and report the outcome.
pub async fn handle_camera_switch(args: &CameraSwitchArgs) -> anyhow::Result<String> {
    let config = super::load_config(&args.config, args.url.as_deref())?;
    let api = api_from(&config)?;

    let mut controller = CameraController::new(api);
    let selection = controller.switch(args.index).await;
    Ok(format!(
        "{}  {}",
        selection.label.bold(),
        paint_status(&selection.status, selection.severity)
    ))
}

/// Report connectivity of the active camera.
pub async fn handle_camera_status(args: &CameraStatusArgs) -> anyhow::Result<String> {
    let config = super::load_config(&args.config, args.url.as_deref())?;
    let api = api_from(&config)?;

    let mut controller = CameraController::new(api);
    let selection = controller.refresh_status().await.clone();

    if args.json {
        return Ok(serde_json::to_string_pretty(&selection)?);
    }
    Ok(paint_status(&selection.status, selection.severity).to_string())
}

fn paint_status(status: &str, severity: StatusSeverity) -> colored::ColoredString {
    match severity {
        StatusSeverity::Ok => status.green(),
        StatusSeverity::Error => status.red(),
    }
}

//! `watch` handler: follow the dashboard in the terminal.

use super::WatchArgs;
use crate::dashboard::{DashboardController, DashboardUpdate};
use crate::toast::Severity;
use crate::view::StatusSeverity;
use colored::Colorize;
use tokio::sync::broadcast::error::RecvError;

/// Start the controller and print every update until Ctrl-C.
pub async fn run_watch(args: &WatchArgs) -> anyhow::Result<()> {
    let mut config = super::load_config(&args.config, args.url.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    crate::logging::init(&config.logging);

    let mut controller = DashboardController::new(&config)?;
    let mut updates = controller.subscribe();
    controller.start();

    println!(
        "Watching {} (Ctrl-C to quit)",
        config.backend.base_url.bold()
    );

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            update = updates.recv() => match update {
                Ok(update) => print_update(&update),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "dropped dashboard updates");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    controller.stop().await;
    Ok(())
}

fn print_update(update: &DashboardUpdate) {
    match update {
        DashboardUpdate::Stats { view, at } => {
            println!(
                "[{at}] good {}  defect {}  ({} / {})",
                view.good.to_string().green().bold(),
                view.defect.to_string().red().bold(),
                view.percent_good,
                view.percent_defect,
            );
        }
        DashboardUpdate::Breakdown { view, at } => {
            let parts: Vec<String> = view
                .labels
                .iter()
                .zip(view.counts.iter())
                .map(|(label, count)| format!("{label}: {count}"))
                .collect();
            println!("[{at}] {}", parts.join("  "));
        }
        DashboardUpdate::Lamp(on) => {
            let state = if *on {
                "ON".yellow().bold()
            } else {
                "off".dimmed()
            };
            println!("lamp {state}");
        }
        DashboardUpdate::Camera(selection) => {
            let status = match selection.severity {
                StatusSeverity::Ok => selection.status.green(),
                StatusSeverity::Error => selection.status.red(),
            };
            println!("{}  {status}", selection.label.bold());
        }
        DashboardUpdate::Toast(toast) => {
            let line = format!(" {} ", toast.message);
            let painted = match toast.severity {
                Severity::Info => line.white().on_blue(),
                Severity::Success => line.white().on_green(),
                Severity::Error => line.white().on_red(),
            };
            println!("{painted}");
        }
    }
}

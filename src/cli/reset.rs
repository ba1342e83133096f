//! `reset` handler: the two-step destructive flow on the terminal.

use super::ResetArgs;
use crate::api::InspectionApi;
use crate::reset::{ConfirmOutcome, PasswordOutcome, ResetFlow, MSG_DELETED, MSG_SERVER_ERROR, RELOAD_DELAY};
use crate::view;
use colored::Colorize;
use std::io::{self, Write};
use std::time::Duration;

/// Interactive two-step reset: password check, explicit confirmation, then a
/// fresh snapshot once the backend has settled.
pub async fn run_reset(args: &ResetArgs) -> anyhow::Result<()> {
    let config = super::load_config(&args.config, args.url.as_deref())?;
    crate::logging::init(&config.logging);
    let api = InspectionApi::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.timeout_seconds),
    )?;

    let mut flow = ResetFlow::new(api.clone());
    flow.open();

    // step one: password entry; Enter submits, like the dashboard modal
    loop {
        let password = prompt("Reset password (Ctrl-C to cancel): ")?;
        match flow.submit_password(&password).await {
            PasswordOutcome::Accepted => break,
            outcome => {
                if let Some(error) = outcome.inline_error() {
                    eprintln!("{}", error.red());
                }
            }
        }
    }

    // step two: explicit destructive confirmation
    let answer = prompt("This permanently deletes all inspection records and images. Type 'yes' to confirm: ")?;
    if !answer.eq_ignore_ascii_case("yes") {
        flow.cancel();
        println!("Reset cancelled.");
        return Ok(());
    }

    match flow.confirm().await {
        ConfirmOutcome::Deleted => {
            println!("{}", MSG_DELETED.green().bold());
            // give the backend the same settling window the dashboard gets
            // before its reload, then show the wiped counters
            tokio::time::sleep(RELOAD_DELAY).await;
            if let Ok(snapshot) = api.stats().await {
                let stats = view::render_stats(&snapshot);
                println!("good {}  defect {}", stats.good, stats.defect);
            }
            Ok(())
        }
        ConfirmOutcome::Rejected(msg) => anyhow::bail!(msg),
        ConfirmOutcome::Unreachable => anyhow::bail!(MSG_SERVER_ERROR),
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

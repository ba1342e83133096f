//! `config init` handler.

use super::ConfigInitArgs;

/// Template written by `linewatch config init`; parses back into the default
/// configuration.
const CONFIG_TEMPLATE: &str = r#"# Linewatch configuration

[backend]
# Base URL of the inspection backend
base_url = "http://127.0.0.1:5000"
# Per-request timeout
timeout_seconds = 5

[polling]
stats_interval_ms = 2000
breakdown_interval_ms = 2000
camera_status_interval_ms = 2000
lamp_interval_ms = 500
# Serve the stats stream from /live_counts instead of /stats
use_live_counts = false

[logging]
# trace, debug, info, warn, error
level = "info"
# pretty or json
format = "pretty"
"#;

/// Write a starter configuration file.
pub fn handle_config_init(args: &ConfigInitArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }
    std::fs::write(&args.output, CONFIG_TEMPLATE)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}

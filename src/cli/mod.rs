//! CLI module for Linewatch
//!
//! Command-line interface definitions and handlers for the inspection
//! dashboard console.
//!
//! # Commands
//!
//! - `watch` - Stream live dashboard updates to the terminal
//! - `stats` - One-shot counter and breakdown snapshot
//! - `camera` - Switch the active camera or check its connectivity
//! - `reset` - Password-gated database reset (two-step)
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Follow the dashboard of the local backend
//! linewatch watch
//!
//! # Switch to the third camera
//! linewatch camera switch 2
//!
//! # One-shot counters as JSON
//! linewatch stats --json
//! ```

pub mod config;
pub mod reset;
pub mod status;
pub mod watch;

pub use config::handle_config_init;

use crate::config::{ConfigError, LinewatchConfig};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Linewatch - Inspection Dashboard Console
#[derive(Parser, Debug)]
#[command(
    name = "linewatch",
    version,
    about = "Dashboard console for vision-based defect inspection lines"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream live dashboard updates to the terminal
    Watch(WatchArgs),
    /// One-shot counter and breakdown snapshot
    Stats(StatsArgs),
    /// Camera control
    #[command(subcommand)]
    Camera(CameraCommands),
    /// Wipe the inspection database (password-gated, two-step)
    Reset(ResetArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "linewatch.toml")]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LINEWATCH_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "linewatch.toml")]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum CameraCommands {
    /// Switch the active camera
    Switch(CameraSwitchArgs),
    /// Check connectivity of the active camera
    Status(CameraStatusArgs),
}

#[derive(Args, Debug)]
pub struct CameraSwitchArgs {
    /// 0-based camera index
    pub index: usize,

    /// Path to configuration file
    #[arg(short, long, default_value = "linewatch.toml")]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long)]
    pub url: Option<String>,
}

#[derive(Args, Debug)]
pub struct CameraStatusArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "linewatch.toml")]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "linewatch.toml")]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(short, long)]
    pub url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "linewatch.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Print completions for the requested shell to stdout.
pub fn handle_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "linewatch", &mut std::io::stdout());
}

/// Resolve the effective configuration for a command.
///
/// A missing file falls back to defaults; a present-but-broken file is an
/// error. Environment overrides apply before the `--url` flag.
pub(crate) fn load_config(
    path: &Path,
    url_override: Option<&str>,
) -> Result<LinewatchConfig, ConfigError> {
    let mut config = match LinewatchConfig::load(Some(path)) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => LinewatchConfig::default(),
        Err(err) => return Err(err),
    };
    config = config.with_env_overrides();
    if let Some(url) = url_override {
        config.backend.base_url = url.trim_end_matches('/').to_string();
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_watch_defaults() {
        let cli = Cli::try_parse_from(["linewatch", "watch"]).unwrap();
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.config, PathBuf::from("linewatch.toml"));
                assert!(args.url.is_none());
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parse_watch_with_url() {
        let cli =
            Cli::try_parse_from(["linewatch", "watch", "-u", "http://line-2:5000"]).unwrap();
        match cli.command {
            Commands::Watch(args) => assert_eq!(args.url.as_deref(), Some("http://line-2:5000")),
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_parse_stats_json() {
        let cli = Cli::try_parse_from(["linewatch", "stats", "--json"]).unwrap();
        match cli.command {
            Commands::Stats(args) => assert!(args.json),
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_cli_parse_camera_switch() {
        let cli = Cli::try_parse_from(["linewatch", "camera", "switch", "2"]).unwrap();
        match cli.command {
            Commands::Camera(CameraCommands::Switch(args)) => assert_eq!(args.index, 2),
            _ => panic!("Expected Camera Switch command"),
        }
    }

    #[test]
    fn test_cli_parse_camera_switch_rejects_non_numeric() {
        assert!(Cli::try_parse_from(["linewatch", "camera", "switch", "two"]).is_err());
    }

    #[test]
    fn test_cli_parse_camera_status() {
        let cli = Cli::try_parse_from(["linewatch", "camera", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Camera(CameraCommands::Status(_))
        ));
    }

    #[test]
    fn test_cli_parse_reset() {
        let cli = Cli::try_parse_from(["linewatch", "reset"]).unwrap();
        assert!(matches!(cli.command, Commands::Reset(_)));
    }

    #[test]
    fn test_cli_parse_config_init_force() {
        let cli = Cli::try_parse_from(["linewatch", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let config = load_config(Path::new("/no/such/linewatch.toml"), None).unwrap();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn load_config_url_flag_wins() {
        let config =
            load_config(Path::new("/no/such/linewatch.toml"), Some("http://line-3:5000/"))
                .unwrap();
        assert_eq!(config.backend.base_url, "http://line-3:5000");
    }

    #[test]
    fn load_config_rejects_invalid_override() {
        assert!(load_config(Path::new("/no/such/linewatch.toml"), Some("not-a-url")).is_err());
    }
}

use clap::Parser;
use linewatch::cli::{self, CameraCommands, Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Watch(args) => cli::watch::run_watch(&args).await,
        Commands::Stats(args) => print_output(cli::status::handle_stats(&args).await),
        Commands::Camera(cmd) => match cmd {
            CameraCommands::Switch(args) => {
                print_output(cli::status::handle_camera_switch(&args).await)
            }
            CameraCommands::Status(args) => {
                print_output(cli::status::handle_camera_status(&args).await)
            }
        },
        Commands::Reset(args) => cli::reset::run_reset(&args).await,
        Commands::Config(ConfigCommands::Init(args)) => cli::handle_config_init(&args),
        Commands::Completions(args) => {
            cli::handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_output(result: anyhow::Result<String>) -> anyhow::Result<()> {
    let output = result?;
    println!("{}", output);
    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod remote;
mod terminal;

use commands::{CheckCommand, ConfigCommand, SnoozeCommand, VersionCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "macromeals")]
#[command(version)]
#[command(about = "Update gate for the Macro Meals client", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an update check against the remote config file
    Check(CheckCommand),

    /// Inspect or clear the soft update snooze
    Snooze(SnoozeCommand),

    /// Version string utilities
    Version(VersionCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "macromeals=info,macro_meals_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Check(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Snooze(cmd)) => {
            cmd.run(&config).await?;
        }
        Some(Commands::Version(cmd)) => {
            cmd.run()?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

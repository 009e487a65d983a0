//! Batch Scanner
//!
//! Scan a serial number or batch code, list every serial number in the
//! batch, and export the listing to a timestamped CSV file.

use anyhow::Result;
use batchscan::settings::Settings;
use batchscan_logging::{init_logging, LogConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

mod cli;

#[derive(Parser, Debug)]
#[command(
    name = "batchscan",
    version,
    about = "Look up a serial number or batch code and export the batch to CSV"
)]
struct Cli {
    /// Enable verbose logging (info/debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Settings file (defaults to ~/.batchscan/config.toml)
    #[arg(long, global = true, env = "BATCHSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Defaults to the interactive scanner
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive scanner
    Tui,

    /// Look up one serial number or batch code and export the batch
    Lookup(cli::lookup::LookupArgs),

    /// Check that the database is reachable
    Check,

    /// Show resolved settings and paths
    Config(cli::config::ConfigArgs),
}

fn run_command(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Tui => cli::tui::run(settings),
        Commands::Lookup(args) => cli::lookup::run(args, settings),
        Commands::Check => cli::check::run(settings),
        Commands::Config(args) => cli::config::run(args, settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    // keep stderr quiet under the alternate screen
    let is_tui_mode = matches!(command, Commands::Tui);
    if let Err(err) = init_logging(LogConfig {
        app_name: "batchscan",
        verbose: cli.verbose,
        tui_mode: is_tui_mode,
    }) {
        eprintln!("Warning: failed to initialize logging: {:#}", err);
    }

    let result = Settings::resolve(cli.config.as_deref())
        .map_err(|e| anyhow::Error::from(cli::HelpfulError::settings(&e)))
        .and_then(|settings| run_command(command, &settings));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("{:?}", err);
            ExitCode::from(1)
        }
    }
}

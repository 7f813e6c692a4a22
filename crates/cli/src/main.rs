//! dockstream - GBFS snapshot collector and warehouse loader
//!
//! # Usage
//!
//! ```bash
//! # One incremental load into the warehouse
//! dockstream load
//! dockstream load --json
//!
//! # Archive one status snapshot
//! dockstream collect
//!
//! # Collect and load on an interval (hourly by default)
//! dockstream serve
//! dockstream serve --interval-secs 600
//!
//! # Create the warehouse database and tables
//! dockstream init
//! dockstream init --dry-run
//!
//! # Load the station information reference snapshot
//! dockstream station-info
//! ```

mod cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dockstream_config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// dockstream - GBFS snapshot collector and warehouse loader
#[derive(Parser, Debug)]
#[command(name = "dockstream")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file (error if specified but not found)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Log level (trace, debug, info, warn, error). Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one incremental load into the warehouse
    Load(cmd::load::LoadArgs),

    /// Fetch one status snapshot and archive it
    Collect(cmd::collect::CollectArgs),

    /// Collect and load on an interval
    Serve(cmd::serve::ServeArgs),

    /// Create the warehouse database and tables
    Init(cmd::init::InitArgs),

    /// Fetch and load the station information reference snapshot
    StationInfo(cmd::station_info::StationInfoArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Command::Load(args) => {
            init_logging(&resolve_log_level(cli.log_level.as_deref(), &config))?;
            cmd::load::run(args, config).await
        }
        Command::Collect(args) => {
            init_logging(&resolve_log_level(cli.log_level.as_deref(), &config))?;
            cmd::collect::run(args, config).await
        }
        Command::Serve(args) => {
            init_logging(&resolve_log_level(cli.log_level.as_deref(), &config))?;
            cmd::serve::run(args, config).await
        }
        Command::Init(args) => {
            // Init just prints to stdout
            cmd::init::run(args, config).await
        }
        Command::StationInfo(args) => {
            init_logging(&resolve_log_level(cli.log_level.as_deref(), &config))?;
            cmd::station_info::run(args, config).await
        }
    }
}

/// Resolve log level: CLI flag > config file > default "info"
fn resolve_log_level(cli_level: Option<&str>, config: &Config) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => config.log.level.as_str().to_string(),
    }
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}

//! Init command - warehouse schema management
//!
//! Creates the database and tables for a working warehouse. All statements
//! are idempotent, so re-running init is safe.
//!
//! # Usage
//!
//! ```bash
//! dockstream init
//! dockstream init --url http://clickhouse:8123
//! dockstream init --dry-run
//! ```

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;

use dockstream_config::Config;
use dockstream_warehouse::{schema, ClickHouseWarehouse};

/// Init command arguments
#[derive(Args, Debug)]
pub struct InitArgs {
    /// ClickHouse HTTP URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// Show what would be created without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the init command
pub async fn run(args: InitArgs, config: Config) -> Result<()> {
    let mut warehouse_config = super::warehouse_config(&config);
    if let Some(url) = args.url {
        warehouse_config.url = url;
    }

    let statements = schema::create_statements(
        &warehouse_config.database,
        &warehouse_config.status_table,
        &warehouse_config.station_info_table,
    );

    if args.dry_run {
        println!("{}", "Statements that would be executed:".bold());
        for sql in &statements {
            println!("\n{sql};");
        }
        return Ok(());
    }

    println!(
        "Initializing warehouse {} at {}",
        warehouse_config.database.bold(),
        warehouse_config.url.bold()
    );

    let warehouse = ClickHouseWarehouse::new(warehouse_config);
    warehouse
        .ping()
        .await
        .context("failed to connect to ClickHouse")?;
    warehouse
        .ensure_schema()
        .await
        .context("failed to create schema")?;

    println!(
        "{} database '{}' ready ({} tables)",
        "ok:".green().bold(),
        warehouse.config().database,
        statements.len() - 1
    );
    Ok(())
}

//! Load command - run one incremental load
//!
//! Reads the ledger, diffs it against the snapshot store, and appends every
//! not-yet-materialized snapshot to the warehouse. Exits non-zero if the run
//! fails; a run that finds nothing new is a quiet success.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use dockstream_config::Config;
use dockstream_pipeline::Loader;
use dockstream_store::FsStore;
use dockstream_warehouse::ClickHouseWarehouse;

/// Load command arguments
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Print the run report as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Skip schema setup (fail instead of bootstrapping a missing table)
    #[arg(long)]
    pub no_init: bool,
}

/// Run the load command
pub async fn run(args: LoadArgs, config: Config) -> Result<()> {
    let store = Arc::new(FsStore::new(&config.store.root));
    let warehouse = Arc::new(ClickHouseWarehouse::new(super::warehouse_config(&config)));

    if !args.no_init {
        warehouse
            .ensure_schema()
            .await
            .context("failed to prepare warehouse schema")?;
    }

    let loader = Loader::new(store, warehouse, super::loader_config(&config));
    let cancel = cancel_on_ctrl_c();

    let report = loader.run(&cancel).await.context("load run failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        info!(
            candidates = report.candidates,
            loaded = report.loaded,
            skipped = report.skipped,
            "load finished"
        );
        for skip in &report.errors {
            warn!(key = %skip.key, reason = %skip.reason, "skipped");
        }
    }

    Ok(())
}

/// Cancellation token wired to ctrl-c
///
/// Cancelling stops the loader from admitting new per-item work; in-flight
/// items drain and already-transformed rows still commit.
pub(crate) fn cancel_on_ctrl_c() -> CancellationToken {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, finishing in-flight work");
            trigger.cancel();
        }
    });
    cancel
}

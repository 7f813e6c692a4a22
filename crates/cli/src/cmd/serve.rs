//! Serve command - collect and load on an interval
//!
//! Each tick collects one snapshot and then runs the incremental load. Ticks
//! are strictly sequential, so two runs never race on the same destination
//! table; a tick that overruns the interval simply delays the next one. Tick
//! errors are logged and the loop keeps going - the next run picks up
//! whatever this one missed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use dockstream_config::Config;
use dockstream_feed::{Collector, GbfsClient};
use dockstream_pipeline::Loader;
use dockstream_store::FsStore;
use dockstream_warehouse::ClickHouseWarehouse;

use super::load::cancel_on_ctrl_c;

/// Serve command arguments
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Seconds between runs (overrides config)
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Skip the collect step and only run the loader
    #[arg(long)]
    pub load_only: bool,
}

/// Run the serve command
pub async fn run(args: ServeArgs, config: Config) -> Result<()> {
    let store = Arc::new(FsStore::new(&config.store.root));
    let warehouse = Arc::new(ClickHouseWarehouse::new(super::warehouse_config(&config)));
    warehouse
        .ensure_schema()
        .await
        .context("failed to prepare warehouse schema")?;

    let feed = Arc::new(
        GbfsClient::new(super::gbfs_config(&config)).context("failed to create feed client")?,
    );
    let collector = Collector::new(feed, store.clone(), config.store.prefix.clone());
    let loader = Loader::new(store, warehouse, super::loader_config(&config));

    let collect_enabled = !(args.load_only || config.scheduler.load_only);
    let interval_secs = args.interval_secs.unwrap_or(config.scheduler.interval_secs);
    let cancel = cancel_on_ctrl_c();

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs, collect_enabled, "scheduler started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = cancel.cancelled() => break,
        }

        if collect_enabled {
            match collector.collect_once(Utc::now()).await {
                Ok(collected) => {
                    info!(key = %collected.key, stations = collected.stations, "collected snapshot");
                }
                Err(e) => {
                    // the loader still runs; missed snapshots are simply absent
                    error!(error = %e, "collect failed");
                }
            }
        }

        match loader.run(&cancel).await {
            Ok(report) => {
                info!(
                    candidates = report.candidates,
                    loaded = report.loaded,
                    skipped = report.skipped,
                    "scheduled run complete"
                );
            }
            Err(e) => {
                error!(error = %e, "scheduled run failed");
            }
        }

        if cancel.is_cancelled() {
            break;
        }
    }

    info!("scheduler stopped");
    Ok(())
}

//! Collect command - fetch one snapshot and archive it

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use tracing::info;

use dockstream_config::Config;
use dockstream_feed::{Collector, GbfsClient};
use dockstream_store::FsStore;

/// Collect command arguments
#[derive(Args, Debug)]
pub struct CollectArgs {}

/// Run the collect command
pub async fn run(_args: CollectArgs, config: Config) -> Result<()> {
    let feed = Arc::new(
        GbfsClient::new(super::gbfs_config(&config)).context("failed to create feed client")?,
    );
    let store = Arc::new(FsStore::new(&config.store.root));
    let collector = Collector::new(feed, store, config.store.prefix.clone());

    let collected = collector
        .collect_once(Utc::now())
        .await
        .context("failed to collect snapshot")?;

    info!(
        key = %collected.key,
        stations = collected.stations,
        bytes = collected.bytes,
        "snapshot archived"
    );
    Ok(())
}

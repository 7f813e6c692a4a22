//! Station-info command - load the reference snapshot
//!
//! Station information (names, capacities, coordinates) rarely changes, so
//! the table holds exactly one current snapshot and is replaced wholesale on
//! each load.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use tracing::info;

use dockstream_config::Config;
use dockstream_feed::{GbfsClient, StatusFeed};
use dockstream_pipeline::transform_station_info;
use dockstream_warehouse::ClickHouseWarehouse;

/// Station-info command arguments
#[derive(Args, Debug)]
pub struct StationInfoArgs {}

/// Run the station-info command
pub async fn run(_args: StationInfoArgs, config: Config) -> Result<()> {
    let client =
        GbfsClient::new(super::gbfs_config(&config)).context("failed to create feed client")?;

    info!(url = %config.feed.information_url, "fetching station information");
    let payload = client
        .fetch_station_information()
        .await
        .context("failed to fetch station information")?;

    let row = transform_station_info(&payload, Utc::now())
        .context("station information payload malformed")?;

    let warehouse = ClickHouseWarehouse::new(super::warehouse_config(&config));
    warehouse
        .ensure_schema()
        .await
        .context("failed to prepare warehouse schema")?;
    warehouse
        .replace_station_info(&row)
        .await
        .context("failed to load station information")?;

    info!("station information loaded");
    Ok(())
}

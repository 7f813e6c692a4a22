//! Command implementations for the dockstream CLI

pub mod collect;
pub mod init;
pub mod load;
pub mod serve;
pub mod station_info;

use std::time::Duration;

use dockstream_config::{BackoffKind, Config, RetrySettings};
use dockstream_feed::GbfsConfig;
use dockstream_pipeline::{LoaderConfig, RetryPolicy};
use dockstream_warehouse::ClickHouseConfig;

/// Map file configuration onto the warehouse client config
pub(crate) fn warehouse_config(config: &Config) -> ClickHouseConfig {
    ClickHouseConfig {
        url: config.warehouse.url.clone(),
        database: config.warehouse.database.clone(),
        status_table: config.warehouse.status_table.clone(),
        station_info_table: config.warehouse.station_info_table.clone(),
        username: config.warehouse.username.clone(),
        password: config.warehouse.password.clone(),
    }
}

/// Map file configuration onto the feed client config
pub(crate) fn gbfs_config(config: &Config) -> GbfsConfig {
    GbfsConfig {
        status_url: config.feed.status_url.clone(),
        information_url: config.feed.information_url.clone(),
        timeout: Duration::from_secs(config.feed.timeout_secs),
    }
}

/// Map file configuration onto the loader config
pub(crate) fn loader_config(config: &Config) -> LoaderConfig {
    LoaderConfig {
        prefix: config.store.prefix.clone(),
        concurrency: config.pipeline.concurrency,
        ledger_retry: retry_policy(&config.pipeline.ledger_retry),
        list_retry: retry_policy(&config.pipeline.list_retry),
        read_retry: retry_policy(&config.pipeline.read_retry),
        load_retry: retry_policy(&config.pipeline.load_retry),
    }
}

fn retry_policy(settings: &RetrySettings) -> RetryPolicy {
    let base = Duration::from_secs(settings.delay_secs);
    let policy = match settings.backoff {
        BackoffKind::Fixed => RetryPolicy::fixed(settings.max_retries, base),
        BackoffKind::Exponential => RetryPolicy::exponential(settings.max_retries, base),
    };
    policy.with_attempt_timeout(Duration::from_secs(settings.timeout_secs))
}

//! dockstream Configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! A minimal config should just work - only specify what you need to change.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use dockstream_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str("[scheduler]\ninterval_secs = 600").unwrap();
//! assert_eq!(config.scheduler.interval_secs, 600);
//! ```
//!
//! # Example Minimal Config
//!
//! ```toml
//! [warehouse]
//! url = "http://localhost:8123"
//!
//! [store]
//! root = "data"
//! ```
//!
//! See `configs/example.toml` for all available options.

mod error;
mod feed;
mod logging;
mod pipeline;
mod scheduler;
mod store;
mod validation;
mod warehouse;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use feed::{FeedConfig, DEFAULT_FEED_TIMEOUT_SECS, DEFAULT_INFORMATION_URL, DEFAULT_STATUS_URL};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use pipeline::{
    BackoffKind, PipelineConfig, RetrySettings, DEFAULT_ATTEMPT_TIMEOUT_SECS, DEFAULT_CONCURRENCY,
};
pub use scheduler::{SchedulerConfig, DEFAULT_INTERVAL_SECS};
pub use store::{StoreConfig, DEFAULT_STATUS_PREFIX, DEFAULT_STORE_ROOT};
pub use validation::validate_config;
pub use warehouse::{
    WarehouseConfig, DEFAULT_DATABASE, DEFAULT_STATION_INFO_TABLE, DEFAULT_STATUS_TABLE,
    DEFAULT_WAREHOUSE_URL,
};

use serde::Deserialize;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,

    /// Snapshot store (where raw snapshots are archived)
    pub store: StoreConfig,

    /// Warehouse (ClickHouse destination)
    pub warehouse: WarehouseConfig,

    /// GBFS feed endpoints
    pub feed: FeedConfig,

    /// Incremental loader behavior
    pub pipeline: PipelineConfig,

    /// Interval scheduling for `serve`
    pub scheduler: SchedulerConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, contains invalid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_str(&contents)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s)?;
        validate_config(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.warehouse.database, "bike_sharing");
        assert_eq!(config.store.prefix, "raw/station_status/");
        assert_eq!(config.scheduler.interval_secs, 3600);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[log]
level = "debug"

[store]
root = "/srv/dockstream"
prefix = "snapshots/"

[warehouse]
url = "http://clickhouse:8123"
database = "mobility"
status_table = "status_raw"

[feed]
timeout_secs = 10

[pipeline]
concurrency = 8

[scheduler]
interval_secs = 900
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.store.root, "/srv/dockstream");
        assert_eq!(config.warehouse.database, "mobility");
        assert_eq!(config.warehouse.status_table, "status_raw");
        assert_eq!(config.feed.timeout_secs, 10);
        assert_eq!(config.pipeline.concurrency, 8);
        assert_eq!(config.scheduler.interval_secs, 900);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_str("[warehouse").is_err());
    }

    #[test]
    fn test_validation_runs_on_parse() {
        let result = Config::from_str("[pipeline]\nconcurrency = 0");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        // forward compatibility: unknown sections don't fail the parse
        let config = Config::from_str("[future_section]\nx = 1").unwrap();
        assert_eq!(config.warehouse.database, "bike_sharing");
    }
}

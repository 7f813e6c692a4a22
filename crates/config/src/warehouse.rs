//! Warehouse (ClickHouse) configuration

use serde::Deserialize;

/// Default ClickHouse HTTP URL
pub const DEFAULT_WAREHOUSE_URL: &str = "http://localhost:8123";

/// Default database name
pub const DEFAULT_DATABASE: &str = "bike_sharing";

/// Default station status table
pub const DEFAULT_STATUS_TABLE: &str = "raw_station_status";

/// Default station information table
pub const DEFAULT_STATION_INFO_TABLE: &str = "raw_station_info";

/// Warehouse configuration
///
/// The destination is append-only: the loader only ever inserts, and
/// deduplication happens before rows are built.
///
/// ```toml
/// [warehouse]
/// url = "http://localhost:8123"
/// database = "bike_sharing"
/// status_table = "raw_station_status"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// ClickHouse HTTP URL (e.g., "http://localhost:8123")
    pub url: String,

    /// Database name
    pub database: String,

    /// Table receiving status snapshots
    pub status_table: String,

    /// Table holding the single current station-information snapshot
    pub station_info_table: String,

    /// Username for authentication (optional)
    pub username: Option<String>,

    /// Password for authentication (optional)
    pub password: Option<String>,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WAREHOUSE_URL.into(),
            database: DEFAULT_DATABASE.into(),
            status_table: DEFAULT_STATUS_TABLE.into(),
            station_info_table: DEFAULT_STATION_INFO_TABLE.into(),
            username: None,
            password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WarehouseConfig::default();
        assert_eq!(config.url, "http://localhost:8123");
        assert_eq!(config.database, "bike_sharing");
        assert_eq!(config.status_table, "raw_station_status");
        assert_eq!(config.station_info_table, "raw_station_info");
        assert!(config.username.is_none());
    }

    #[test]
    fn test_deserialize_credentials() {
        let toml = r#"
url = "http://clickhouse:8123"
username = "loader"
password = "secret"
"#;
        let config: WarehouseConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.url, "http://clickhouse:8123");
        assert_eq!(config.username.as_deref(), Some("loader"));
        assert_eq!(config.password.as_deref(), Some("secret"));
    }
}

//! Snapshot store configuration

use serde::Deserialize;

/// Default root directory for the filesystem-backed store
pub const DEFAULT_STORE_ROOT: &str = "data";

/// Default key prefix for station status snapshots
pub const DEFAULT_STATUS_PREFIX: &str = "raw/station_status/";

/// Snapshot store configuration
///
/// Snapshots are immutable JSON objects written once by the collector and
/// read back by the loader. Keys are `/`-separated paths under `root`.
///
/// ```toml
/// [store]
/// root = "data"
/// prefix = "raw/station_status/"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory for the filesystem store
    pub root: String,

    /// Key prefix under which status snapshots live
    pub prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_STORE_ROOT.into(),
            prefix: DEFAULT_STATUS_PREFIX.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.root, "data");
        assert_eq!(config.prefix, "raw/station_status/");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: StoreConfig = toml::from_str("root = \"/var/lib/dockstream\"").unwrap();
        assert_eq!(config.root, "/var/lib/dockstream");
        assert_eq!(config.prefix, DEFAULT_STATUS_PREFIX);
    }
}

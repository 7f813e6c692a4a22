//! GBFS feed configuration

use serde::Deserialize;

/// Default station status endpoint
pub const DEFAULT_STATUS_URL: &str = "https://gbfs.lyft.com/gbfs/2.3/bkn/en/station_status.json";

/// Default station information endpoint
pub const DEFAULT_INFORMATION_URL: &str =
    "https://gbfs.lyft.com/gbfs/2.3/bkn/en/station_information.json";

/// Default request timeout in seconds
pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 20;

/// Feed configuration
///
/// ```toml
/// [feed]
/// status_url = "https://gbfs.lyft.com/gbfs/2.3/bkn/en/station_status.json"
/// timeout_secs = 20
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Station status endpoint (real-time data, fetched every interval)
    pub status_url: String,

    /// Station information endpoint (reference data, fetched on demand)
    pub information_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            status_url: DEFAULT_STATUS_URL.into(),
            information_url: DEFAULT_INFORMATION_URL.into(),
            timeout_secs: DEFAULT_FEED_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FeedConfig::default();
        assert!(config.status_url.contains("station_status.json"));
        assert!(config.information_url.contains("station_information.json"));
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: FeedConfig = toml::from_str("timeout_secs = 5").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.status_url, DEFAULT_STATUS_URL);
    }
}

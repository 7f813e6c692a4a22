//! Incremental loader configuration
//!
//! Default retry budgets: ledger and listing calls retry twice with a
//! 10 second delay, per-snapshot reads retry three times with a 5 second
//! delay (high volume, cheap to retry), and the final batch load retries
//! twice with a 30 second delay (the warehouse is a shared, possibly
//! rate-limited resource).

use serde::Deserialize;

/// Default number of concurrent per-snapshot read+transform workers
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default per-attempt timeout in seconds
pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// Backoff shape between retry attempts
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// Same delay between every attempt (default)
    #[default]
    Fixed,
    /// Delay doubles each attempt
    Exponential,
}

/// Retry settings for one pipeline step
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RetrySettings {
    /// Retry attempts after the first failure
    pub max_retries: u32,

    /// Delay before each retry, in seconds
    pub delay_secs: u64,

    /// Backoff shape (fixed, exponential)
    pub backoff: BackoffKind,

    /// Per-attempt timeout, in seconds
    pub timeout_secs: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay_secs: 10,
            backoff: BackoffKind::Fixed,
            timeout_secs: DEFAULT_ATTEMPT_TIMEOUT_SECS,
        }
    }
}

impl RetrySettings {
    fn new(max_retries: u32, delay_secs: u64) -> Self {
        Self {
            max_retries,
            delay_secs,
            ..Default::default()
        }
    }
}

/// Loader configuration
///
/// ```toml
/// [pipeline]
/// concurrency = 4
///
/// [pipeline.read_retry]
/// max_retries = 3
/// delay_secs = 5
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Concurrent per-snapshot workers (1 = fully sequential)
    pub concurrency: usize,

    /// Retry settings for the ledger query
    pub ledger_retry: RetrySettings,

    /// Retry settings for listing the snapshot store
    pub list_retry: RetrySettings,

    /// Retry settings for individual snapshot reads
    pub read_retry: RetrySettings,

    /// Retry settings for the batch load
    pub load_retry: RetrySettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            ledger_retry: RetrySettings::new(2, 10),
            list_retry: RetrySettings::new(2, 10),
            read_retry: RetrySettings::new(3, 5),
            load_retry: RetrySettings::new(2, 30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.ledger_retry.max_retries, 2);
        assert_eq!(config.ledger_retry.delay_secs, 10);
        assert_eq!(config.read_retry.max_retries, 3);
        assert_eq!(config.read_retry.delay_secs, 5);
        assert_eq!(config.load_retry.max_retries, 2);
        assert_eq!(config.load_retry.delay_secs, 30);
    }

    #[test]
    fn test_deserialize_empty() {
        let config: PipelineConfig = toml::from_str("").unwrap();
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.list_retry, RetrySettings::new(2, 10));
    }

    #[test]
    fn test_deserialize_nested_retry() {
        let toml = r#"
concurrency = 1

[read_retry]
max_retries = 0
delay_secs = 1
backoff = "exponential"
"#;
        let config: PipelineConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.read_retry.max_retries, 0);
        assert_eq!(config.read_retry.backoff, BackoffKind::Exponential);
        // untouched sections keep their defaults
        assert_eq!(config.load_retry.delay_secs, 30);
    }
}

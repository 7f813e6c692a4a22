//! Configuration validation
//!
//! Validates config consistency:
//! - URLs and table identifiers are present
//! - Concurrency and interval values are usable
//! - The snapshot prefix ends with a separator so keys join cleanly

use crate::error::{ConfigError, Result};
use crate::Config;

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_store(config)?;
    validate_warehouse(config)?;
    validate_feed(config)?;
    validate_pipeline(config)?;
    validate_scheduler(config)?;
    Ok(())
}

fn validate_store(config: &Config) -> Result<()> {
    if config.store.root.is_empty() {
        return Err(ConfigError::missing_field("store", "root"));
    }
    if !config.store.prefix.is_empty() && !config.store.prefix.ends_with('/') {
        return Err(ConfigError::invalid_value(
            "store",
            "prefix",
            "must end with '/'",
        ));
    }
    Ok(())
}

fn validate_warehouse(config: &Config) -> Result<()> {
    let wh = &config.warehouse;
    if wh.url.is_empty() {
        return Err(ConfigError::missing_field("warehouse", "url"));
    }
    if wh.database.is_empty() {
        return Err(ConfigError::missing_field("warehouse", "database"));
    }
    for (field, value) in [
        ("status_table", &wh.status_table),
        ("station_info_table", &wh.station_info_table),
    ] {
        if value.is_empty() {
            return Err(ConfigError::missing_field("warehouse", field));
        }
        if !is_valid_identifier(value) {
            return Err(ConfigError::invalid_value(
                "warehouse",
                field,
                "use only letters, numbers, and underscores",
            ));
        }
    }
    if !is_valid_identifier(&wh.database) {
        return Err(ConfigError::invalid_value(
            "warehouse",
            "database",
            "use only letters, numbers, and underscores",
        ));
    }
    Ok(())
}

fn validate_feed(config: &Config) -> Result<()> {
    if config.feed.status_url.is_empty() {
        return Err(ConfigError::missing_field("feed", "status_url"));
    }
    if config.feed.information_url.is_empty() {
        return Err(ConfigError::missing_field("feed", "information_url"));
    }
    if config.feed.timeout_secs == 0 {
        return Err(ConfigError::invalid_value(
            "feed",
            "timeout_secs",
            "must be at least 1",
        ));
    }
    Ok(())
}

fn validate_pipeline(config: &Config) -> Result<()> {
    if config.pipeline.concurrency == 0 {
        return Err(ConfigError::invalid_value(
            "pipeline",
            "concurrency",
            "must be at least 1",
        ));
    }
    for (field, retry) in [
        ("ledger_retry", &config.pipeline.ledger_retry),
        ("list_retry", &config.pipeline.list_retry),
        ("read_retry", &config.pipeline.read_retry),
        ("load_retry", &config.pipeline.load_retry),
    ] {
        if retry.timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "pipeline",
                field,
                "timeout_secs must be at least 1",
            ));
        }
    }
    Ok(())
}

fn validate_scheduler(config: &Config) -> Result<()> {
    if config.scheduler.interval_secs == 0 {
        return Err(ConfigError::invalid_value(
            "scheduler",
            "interval_secs",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Identifiers are interpolated into DDL and queries, so keep them strict
fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_warehouse_url() {
        let mut config = Config::default();
        config.warehouse.url = String::new();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField {
                section: "warehouse",
                field: "url",
            })
        ));
    }

    #[test]
    fn test_bad_table_identifier() {
        let mut config = Config::default();
        config.warehouse.status_table = "raw; DROP TABLE x".into();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_prefix_must_end_with_slash() {
        let mut config = Config::default();
        config.store.prefix = "raw/station_status".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_empty_prefix_allowed() {
        let mut config = Config::default();
        config.store.prefix = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut config = Config::default();
        config.pipeline.concurrency = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = Config::default();
        config.scheduler.interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("raw_station_status"));
        assert!(is_valid_identifier("t1"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("bad-name"));
        assert!(!is_valid_identifier("bad name"));
    }
}

//! Warehouse row types

use chrono::NaiveDate;
use clickhouse::Row;
use serde::Serialize;

use dockstream_store::format_timestamp;

/// One materialized station-status snapshot (raw_station_status table)
///
/// `data_fetched_at` is the collection timestamp from the snapshot's
/// filename and is unique across all rows in steady state; the loader's
/// dedup filter maintains that invariant. `date_partition` is always derived
/// from the same timestamp.
///
/// ```sql
/// CREATE TABLE raw_station_status (
///     last_updated Nullable(Int64),
///     ttl Nullable(Int64),
///     version Nullable(String),
///     data_fetched_at DateTime64(0, 'UTC'),
///     date_partition Date,
///     stations String
/// ) ENGINE = MergeTree()
/// PARTITION BY date_partition
/// ORDER BY data_fetched_at
/// ```
#[derive(Debug, Clone, PartialEq, Row, Serialize)]
pub struct StatusRow {
    /// Feed-reported publish time (epoch seconds)
    pub last_updated: Option<i64>,

    /// Feed-reported freshness window in seconds
    pub ttl: Option<i64>,

    /// Feed schema version
    pub version: Option<String>,

    /// Collection timestamp (epoch seconds, UTC) - the dedup key
    pub data_fetched_at: i64,

    /// Calendar date of `data_fetched_at`, as days since the Unix epoch
    pub date_partition: u16,

    /// Station array serialized as one JSON string
    pub stations: String,
}

impl StatusRow {
    /// Collection timestamp in the snapshot filename format
    ///
    /// Returns `None` only for an epoch value outside chrono's range.
    pub fn fetched_at_str(&self) -> Option<String> {
        chrono::DateTime::from_timestamp(self.data_fetched_at, 0)
            .map(|dt| format_timestamp(dt.naive_utc()))
    }
}

/// The single current station-information snapshot (raw_station_info table)
///
/// Reference data: station names, capacities, and coordinates. Rarely
/// changes, so the table is replaced wholesale on each load instead of
/// appended to.
///
/// ```sql
/// CREATE TABLE raw_station_info (
///     last_updated Nullable(Int64),
///     ttl Nullable(Int64),
///     version Nullable(String),
///     data_fetched_at DateTime64(0, 'UTC'),
///     stations String
/// ) ENGINE = MergeTree()
/// ORDER BY data_fetched_at
/// ```
#[derive(Debug, Clone, PartialEq, Row, Serialize)]
pub struct StationInfoRow {
    /// Feed-reported publish time (epoch seconds)
    pub last_updated: Option<i64>,

    /// Feed-reported freshness window in seconds
    pub ttl: Option<i64>,

    /// Feed schema version
    pub version: Option<String>,

    /// Fetch time (epoch seconds, UTC)
    pub data_fetched_at: i64,

    /// Station array serialized as one JSON string
    pub stations: String,
}

/// Days since the Unix epoch, as ClickHouse `Date` columns store it
pub fn date_to_days(date: NaiveDate) -> u16 {
    // chrono's default NaiveDate is the Unix epoch
    date.signed_duration_since(NaiveDate::default())
        .num_days()
        .clamp(0, i64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_to_days() {
        assert_eq!(date_to_days(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(date_to_days(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()), 1);
        // dates before the epoch clamp to 0 rather than wrapping
        assert_eq!(date_to_days(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), 0);
    }

    #[test]
    fn test_fetched_at_str() {
        let row = StatusRow {
            last_updated: Some(1_767_366_000),
            ttl: Some(60),
            version: Some("2.3".into()),
            data_fetched_at: chrono::NaiveDate::from_ymd_opt(2026, 1, 2)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp(),
            date_partition: date_to_days(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()),
            stations: "[]".into(),
        };
        assert_eq!(row.fetched_at_str().as_deref(), Some("20260102_150000"));
    }
}

//! Snapshot key grammar
//!
//! Every archived snapshot is keyed as
//! `<prefix>date=<YYYY-MM-DD>/status_<YYYYMMDD_HHMMSS>.json`. The filename
//! timestamp is the single source of truth: the `date=` path segment is only
//! decoration written by the collector, and is never parsed back. Dedup
//! against the warehouse ledger compares filename-format timestamps, so both
//! directions of the conversion live here.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::KeyError;

/// Filename timestamp format, second resolution, UTC
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Filename prefix for status snapshots
const FILE_PREFIX: &str = "status_";

/// Filename suffix for status snapshots
const FILE_SUFFIX: &str = ".json";

/// Format a timestamp in the filename format (`20260102_143000`)
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Build the object key for a status snapshot collected at `ts`
///
/// The date partition in the path is derived from the same timestamp that
/// lands in the filename, keeping the two consistent by construction.
pub fn status_object_key(prefix: &str, ts: NaiveDateTime) -> String {
    format!(
        "{prefix}date={date}/{FILE_PREFIX}{stamp}{FILE_SUFFIX}",
        date = ts.date().format("%Y-%m-%d"),
        stamp = format_timestamp(ts),
    )
}

/// A parsed snapshot key
///
/// Holds the full object key plus the collection timestamp extracted from its
/// filename. All derived values (partition date, epoch seconds, ledger
/// comparison string) come from that timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKey {
    key: String,
    timestamp: NaiveDateTime,
}

impl SnapshotKey {
    /// Parse an object key, extracting the collection timestamp from the
    /// filename
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Grammar`] if the filename is not
    /// `status_<...>.json`, or [`KeyError::Timestamp`] if the middle portion
    /// is not a valid `YYYYMMDD_HHMMSS` timestamp.
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        let filename = key.rsplit('/').next().unwrap_or(key);

        let stamp = filename
            .strip_prefix(FILE_PREFIX)
            .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            .ok_or_else(|| KeyError::Grammar {
                key: key.to_string(),
            })?;

        // chrono accepts under-width fields ("2026012_..."), so pin the
        // canonical 15-char form before parsing
        if stamp.len() != 15 {
            return Err(KeyError::Timestamp {
                key: key.to_string(),
                value: stamp.to_string(),
            });
        }

        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|_| {
            KeyError::Timestamp {
                key: key.to_string(),
                value: stamp.to_string(),
            }
        })?;

        Ok(Self {
            key: key.to_string(),
            timestamp,
        })
    }

    /// The full object key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Collection timestamp (UTC, second resolution)
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp in filename format, for comparison against the ledger
    pub fn timestamp_str(&self) -> String {
        format_timestamp(self.timestamp)
    }

    /// Calendar date partition, derived from the filename timestamp
    pub fn date_partition(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Collection timestamp as Unix epoch seconds
    pub fn fetched_at_epoch(&self) -> i64 {
        self.timestamp.and_utc().timestamp()
    }
}

impl std::fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

#[cfg(test)]
#[path = "key_test.rs"]
mod key_test;

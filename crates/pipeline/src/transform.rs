//! Snapshot transformation
//!
//! Pure and deterministic: one raw snapshot plus its key becomes one
//! warehouse row. No I/O happens here, which keeps the hot path trivially
//! parallel and the error taxonomy clean - anything thrown from this module
//! means the payload itself is bad, never the network.

use serde::Deserialize;
use thiserror::Error;

use chrono::{DateTime, Utc};

use dockstream_store::SnapshotKey;
use dockstream_warehouse::{date_to_days, StationInfoRow, StatusRow};

/// Payload-shape errors
///
/// Distinct from [`dockstream_store::KeyError`]: a bad filename can never be
/// recovered, while bad content may warrant a re-fetch by the collector.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Payload is not valid JSON
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload parsed but the feed's `data` container is absent
    #[error("snapshot missing top-level 'data' container")]
    MissingData,
}

/// The slice of the GBFS payload this pipeline cares about
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    last_updated: Option<i64>,
    ttl: Option<i64>,
    version: Option<String>,
    data: Option<RawData>,
}

#[derive(Debug, Deserialize)]
struct RawData {
    /// Absent stations decode as empty; zero stations is valid feed output
    #[serde(default)]
    stations: Vec<serde_json::Value>,
}

/// Transform one raw snapshot into a warehouse row
///
/// `data_fetched_at` and the date partition both come from the key's
/// filename timestamp. The station array is re-serialized as one opaque
/// JSON string; the warehouse does not need per-station columns.
pub fn transform(key: &SnapshotKey, payload: &[u8]) -> Result<StatusRow, TransformError> {
    let raw: RawSnapshot = serde_json::from_slice(payload)?;
    let data = raw.data.ok_or(TransformError::MissingData)?;
    let stations = serde_json::to_string(&data.stations)?;

    Ok(StatusRow {
        last_updated: raw.last_updated,
        ttl: raw.ttl,
        version: raw.version,
        data_fetched_at: key.fetched_at_epoch(),
        date_partition: date_to_days(key.date_partition()),
        stations,
    })
}

/// Transform a station-information payload into its reference row
///
/// Station info has no archived key; `fetched_at` is the wall-clock time of
/// the fetch itself.
pub fn transform_station_info(
    payload: &[u8],
    fetched_at: DateTime<Utc>,
) -> Result<StationInfoRow, TransformError> {
    let raw: RawSnapshot = serde_json::from_slice(payload)?;
    let data = raw.data.ok_or(TransformError::MissingData)?;
    let stations = serde_json::to_string(&data.stations)?;

    Ok(StationInfoRow {
        last_updated: raw.last_updated,
        ttl: raw.ttl,
        version: raw.version,
        data_fetched_at: fetched_at.timestamp(),
        stations,
    })
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

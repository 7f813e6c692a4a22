//! Snapshot collector
//!
//! One collect cycle fetches the live station status and archives the
//! payload verbatim into the snapshot store, keyed by the collection
//! wall-clock. Archived objects are immutable; re-collecting at the same
//! second would overwrite with identical semantics, and nothing here ever
//! deletes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use dockstream_store::{status_object_key, ObjectStore};

use crate::error::CollectError;
use crate::StatusFeed;

/// Result of one collect cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedSnapshot {
    /// Key the snapshot was archived under
    pub key: String,

    /// Number of stations in the payload (0 if the shape was unexpected;
    /// the loader revalidates on its own schedule)
    pub stations: usize,

    /// Payload size in bytes
    pub bytes: usize,
}

/// Fetch-and-archive component
pub struct Collector {
    feed: Arc<dyn StatusFeed>,
    store: Arc<dyn ObjectStore>,
    prefix: String,
}

impl Collector {
    /// Create a collector writing under `prefix`
    pub fn new(
        feed: Arc<dyn StatusFeed>,
        store: Arc<dyn ObjectStore>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            feed,
            store,
            prefix: prefix.into(),
        }
    }

    /// Fetch one status snapshot and archive it
    ///
    /// `now` is passed in rather than read from the clock so collection
    /// timing is controlled by the caller (and testable).
    pub async fn collect_once(&self, now: DateTime<Utc>) -> Result<CollectedSnapshot, CollectError> {
        let payload = self.feed.fetch_station_status().await?;
        let key = status_object_key(&self.prefix, now.naive_utc());

        self.store.write(&key, &payload).await?;

        let stations = count_stations(&payload);
        info!(key = %key, stations, bytes = payload.len(), "archived status snapshot");

        Ok(CollectedSnapshot {
            key,
            stations,
            bytes: payload.len(),
        })
    }
}

/// Best-effort station count for logging; shape problems are the loader's
/// concern, not the collector's
fn count_stations(payload: &[u8]) -> usize {
    serde_json::from_slice::<serde_json::Value>(payload)
        .ok()
        .and_then(|v| {
            v.get("data")
                .and_then(|d| d.get("stations"))
                .and_then(|s| s.as_array().map(Vec::len))
        })
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod collector_test;

//! Tests for the collector

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{TimeZone, Utc};

use dockstream_store::{MemoryStore, ObjectStore};

use crate::collector::Collector;
use crate::error::FeedError;
use crate::StatusFeed;

struct StubFeed {
    payload: Vec<u8>,
    fail: bool,
}

#[async_trait]
impl StatusFeed for StubFeed {
    async fn fetch_station_status(&self) -> Result<Bytes, FeedError> {
        if self.fail {
            return Err(FeedError::Init("stub outage".into()));
        }
        Ok(Bytes::copy_from_slice(&self.payload))
    }

    async fn fetch_station_information(&self) -> Result<Bytes, FeedError> {
        self.fetch_station_status().await
    }
}

fn status_payload() -> Vec<u8> {
    br#"{"last_updated": 1767366000, "ttl": 60, "version": "2.3",
        "data": {"stations": [{"station_id": "a1"}, {"station_id": "b2"}]}}"#
        .to_vec()
}

#[tokio::test]
async fn test_collect_archives_payload_verbatim() {
    let feed = Arc::new(StubFeed {
        payload: status_payload(),
        fail: false,
    });
    let store = Arc::new(MemoryStore::new());
    let collector = Collector::new(feed, store.clone(), "raw/station_status/");

    let now = Utc.with_ymd_and_hms(2026, 1, 2, 14, 30, 0).unwrap();
    let collected = collector.collect_once(now).await.unwrap();

    assert_eq!(
        collected.key,
        "raw/station_status/date=2026-01-02/status_20260102_143000.json"
    );
    assert_eq!(collected.stations, 2);

    let archived = store.read(&collected.key).await.unwrap();
    assert_eq!(&archived[..], &status_payload()[..]);
}

#[tokio::test]
async fn test_collect_propagates_feed_failure() {
    let feed = Arc::new(StubFeed {
        payload: Vec::new(),
        fail: true,
    });
    let store = Arc::new(MemoryStore::new());
    let collector = Collector::new(feed, store.clone(), "raw/station_status/");

    let result = collector.collect_once(Utc::now()).await;
    assert!(result.is_err());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_station_count_is_best_effort() {
    let feed = Arc::new(StubFeed {
        payload: b"not even json".to_vec(),
        fail: false,
    });
    let store = Arc::new(MemoryStore::new());
    let collector = Collector::new(feed, store.clone(), "raw/station_status/");

    // an odd payload still gets archived; the loader decides what to reject
    let collected = collector
        .collect_once(Utc.with_ymd_and_hms(2026, 1, 2, 15, 0, 0).unwrap())
        .await
        .unwrap();
    assert_eq!(collected.stations, 0);
    assert_eq!(store.len(), 1);
}

//! dockstream - GBFS Feed
//!
//! The external data source: a GBFS publisher exposing station status
//! (real-time) and station information (reference) endpoints. The collector
//! pairs the feed with the snapshot store to implement fetch-and-archive.

mod client;
mod collector;
mod error;

use async_trait::async_trait;
use bytes::Bytes;

pub use client::{GbfsClient, GbfsConfig, DEFAULT_TIMEOUT};
pub use collector::{CollectedSnapshot, Collector};
pub use error::{CollectError, FeedError};

/// A source of station status payloads
///
/// Implementations return raw bytes so callers can archive exactly what the
/// feed served.
#[async_trait]
pub trait StatusFeed: Send + Sync {
    /// Fetch the current station status payload
    async fn fetch_station_status(&self) -> Result<Bytes, FeedError>;

    /// Fetch the station information payload
    async fn fetch_station_information(&self) -> Result<Bytes, FeedError>;
}

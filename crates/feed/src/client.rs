//! GBFS feed client
//!
//! Fetches station status and station information payloads from a GBFS
//! publisher. Payloads are returned as raw bytes so the collector can
//! archive exactly what the feed served.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::FeedError;
use crate::StatusFeed;

/// User agent sent with every feed request
const USER_AGENT: &str = "dockstream-collector/0.1";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// GBFS client configuration
#[derive(Debug, Clone)]
pub struct GbfsConfig {
    /// Station status endpoint (real-time data)
    pub status_url: String,

    /// Station information endpoint (reference data)
    pub information_url: String,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self {
            status_url: "https://gbfs.lyft.com/gbfs/2.3/bkn/en/station_status.json".into(),
            information_url: "https://gbfs.lyft.com/gbfs/2.3/bkn/en/station_information.json"
                .into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for a GBFS feed
pub struct GbfsClient {
    client: reqwest::Client,
    config: GbfsConfig,
}

impl GbfsClient {
    /// Create a client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails
    pub fn new(config: GbfsConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FeedError::Init(format!("GBFS HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get reference to config
    pub fn config(&self) -> &GbfsConfig {
        &self.config
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, FeedError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload = response.bytes().await?;
        tracing::debug!(url = %url, bytes = payload.len(), "fetched feed payload");
        Ok(payload)
    }
}

#[async_trait]
impl StatusFeed for GbfsClient {
    async fn fetch_station_status(&self) -> Result<Bytes, FeedError> {
        self.fetch(&self.config.status_url).await
    }

    async fn fetch_station_information(&self) -> Result<Bytes, FeedError> {
        self.fetch(&self.config.information_url).await
    }
}

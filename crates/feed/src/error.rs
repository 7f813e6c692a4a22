//! Feed errors

use thiserror::Error;

use dockstream_store::StoreError;

/// Errors from the GBFS feed client
#[derive(Debug, Error)]
pub enum FeedError {
    /// Failed to initialize the HTTP client (e.g., TLS misconfiguration)
    #[error("failed to initialize feed client: {0}")]
    Init(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors from one collect cycle
#[derive(Debug, Error)]
pub enum CollectError {
    /// Fetching from the feed failed
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Archiving the snapshot failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

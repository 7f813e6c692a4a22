//! Snapshot store errors

use std::io;
use thiserror::Error;

/// Errors from object store operations
///
/// All variants represent I/O-level failures and are safe to retry;
/// key-grammar problems are a separate type ([`KeyError`]) because the
/// recovery policy differs (a malformed key can never succeed on retry).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Object does not exist
    #[error("object '{key}' not found")]
    NotFound {
        /// The requested key
        key: String,
    },

    /// Underlying I/O failure
    #[error("store I/O error at '{path}': {source}")]
    Io {
        /// Path or key involved
        path: String,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Errors from snapshot key parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Filename does not follow `status_<timestamp>.json`
    #[error("key '{key}' does not match 'status_<YYYYMMDD_HHMMSS>.json'")]
    Grammar {
        /// The offending key
        key: String,
    },

    /// Filename matched but the timestamp portion is unparseable
    #[error("key '{key}' has invalid timestamp '{value}'")]
    Timestamp {
        /// The offending key
        key: String,
        /// The timestamp portion that failed to parse
        value: String,
    },
}

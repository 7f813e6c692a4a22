//! dockstream - Snapshot Store
//!
//! Append-only object store holding one immutable JSON snapshot per
//! collection event. The collector writes snapshots once; the loader lists
//! and reads them; nothing here ever mutates or deletes an object.
//!
//! # Key grammar
//!
//! Snapshots live at `<prefix>date=<YYYY-MM-DD>/status_<YYYYMMDD_HHMMSS>.json`.
//! The filename timestamp identifies the snapshot everywhere: in the store,
//! in the warehouse ledger, and in the dedup filter. See [`key`].
//!
//! # Backends
//!
//! | Backend | Purpose |
//! |---------|---------|
//! | [`FsStore`] | Local directory tree (production) |
//! | [`MemoryStore`] | Tests and experiments |

mod error;
mod fs;
pub mod key;
mod memory;

use async_trait::async_trait;
use bytes::Bytes;

pub use error::{KeyError, StoreError};
pub use fs::FsStore;
pub use key::{format_timestamp, status_object_key, SnapshotKey, TIMESTAMP_FORMAT};
pub use memory::MemoryStore;

/// Object store abstraction
///
/// Keys are opaque `/`-separated strings. Listing order is not guaranteed;
/// callers must not depend on it.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List every object key starting with `prefix`
    ///
    /// An empty result is valid output, not an error.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Read one object's bytes
    async fn read(&self, key: &str) -> Result<Bytes, StoreError>;

    /// Write one object, replacing any existing content at `key`
    async fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;
}

//! dockstream - Warehouse
//!
//! The analytical destination for materialized snapshots. One row per
//! collection event lands in the status table; deduplication against rows
//! already present is driven by the set of loaded collection timestamps
//! (the "ledger"), which is nothing more than `SELECT DISTINCT
//! data_fetched_at` normalized to the snapshot filename format.
//!
//! # Implementations
//!
//! | Backend | Purpose |
//! |---------|---------|
//! | [`ClickHouseWarehouse`] | Production destination |
//! | [`MemoryWarehouse`] | Tests, failure injection |

mod clickhouse;
mod error;
mod memory;
mod rows;
pub mod schema;

use std::collections::HashSet;

use async_trait::async_trait;

pub use crate::clickhouse::{ClickHouseConfig, ClickHouseWarehouse, DEFAULT_URL};
pub use error::WarehouseError;
pub use memory::MemoryWarehouse;
pub use rows::{date_to_days, StationInfoRow, StatusRow};

/// Destination table abstraction
///
/// Append-only: implementations never delete, replace, or deduplicate
/// status rows. All "is this already loaded" logic lives with the caller,
/// keyed on the timestamps this trait reports.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Distinct collection timestamps already materialized, in the snapshot
    /// filename format (`YYYYMMDD_HHMMSS`)
    async fn loaded_timestamps(&self) -> Result<HashSet<String>, WarehouseError>;

    /// Append rows as one logical load operation
    ///
    /// An empty batch is a no-op, not an error.
    async fn append_rows(&self, rows: &[StatusRow]) -> Result<(), WarehouseError>;
}

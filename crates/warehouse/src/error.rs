//! Warehouse errors

use thiserror::Error;

/// Errors from warehouse operations
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// ClickHouse client error
    #[error("clickhouse error: {0}")]
    ClickHouse(#[from] clickhouse::error::Error),

    /// Ledger query could not be served
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// Insert error
    #[error("insert error: {0}")]
    Insert(String),
}

//! In-memory warehouse
//!
//! Backs pipeline tests without a ClickHouse server. Supports injecting a
//! bounded number of failures on the ledger and append paths to exercise
//! retry and downgrade behavior.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::WarehouseError;
use crate::rows::StatusRow;
use crate::Warehouse;

/// Warehouse held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryWarehouse {
    rows: Mutex<Vec<StatusRow>>,
    ledger_failures: AtomicU32,
    append_failures: AtomicU32,
}

impl MemoryWarehouse {
    /// Create an empty warehouse
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all appended rows
    pub fn rows(&self) -> Vec<StatusRow> {
        self.rows.lock().clone()
    }

    /// Number of appended rows
    pub fn row_count(&self) -> usize {
        self.rows.lock().len()
    }

    /// Make the next `n` ledger queries fail
    pub fn fail_next_ledger_queries(&self, n: u32) {
        self.ledger_failures.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` appends fail
    pub fn fail_next_appends(&self, n: u32) {
        self.append_failures.store(n, Ordering::SeqCst);
    }

    fn take_failure(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl Warehouse for MemoryWarehouse {
    async fn loaded_timestamps(&self) -> Result<HashSet<String>, WarehouseError> {
        if Self::take_failure(&self.ledger_failures) {
            return Err(WarehouseError::Unavailable("injected ledger failure".into()));
        }

        Ok(self
            .rows
            .lock()
            .iter()
            .filter_map(|row| row.fetched_at_str())
            .collect())
    }

    async fn append_rows(&self, rows: &[StatusRow]) -> Result<(), WarehouseError> {
        if rows.is_empty() {
            return Ok(());
        }
        if Self::take_failure(&self.append_failures) {
            return Err(WarehouseError::Insert("injected append failure".into()));
        }

        self.rows.lock().extend_from_slice(rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::date_to_days;
    use chrono::NaiveDate;

    fn row(epoch: i64) -> StatusRow {
        StatusRow {
            last_updated: None,
            ttl: None,
            version: None,
            data_fetched_at: epoch,
            date_partition: date_to_days(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()),
            stations: "[]".into(),
        }
    }

    #[tokio::test]
    async fn test_append_then_ledger() {
        let warehouse = MemoryWarehouse::new();
        assert!(warehouse.loaded_timestamps().await.unwrap().is_empty());

        let ts = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        warehouse.append_rows(&[row(ts)]).await.unwrap();

        let loaded = warehouse.loaded_timestamps().await.unwrap();
        assert!(loaded.contains("20260102_143000"));
        assert_eq!(warehouse.row_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_append_is_noop() {
        let warehouse = MemoryWarehouse::new();
        warehouse.fail_next_appends(1);
        // empty input returns before the failure injection
        warehouse.append_rows(&[]).await.unwrap();
        assert_eq!(warehouse.row_count(), 0);
    }

    #[tokio::test]
    async fn test_injected_failures_are_bounded() {
        let warehouse = MemoryWarehouse::new();
        warehouse.fail_next_ledger_queries(2);

        assert!(warehouse.loaded_timestamps().await.is_err());
        assert!(warehouse.loaded_timestamps().await.is_err());
        assert!(warehouse.loaded_timestamps().await.is_ok());
    }
}

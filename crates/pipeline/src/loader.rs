//! Incremental loader
//!
//! One run walks a fixed sequence: read the ledger, list the store, diff the
//! two into a work set, read+transform each new snapshot, and append the
//! surviving rows as a single batch. The warehouse itself is the only
//! checkpoint - there is no state file, so a run can always be recomputed
//! from scratch and repeated runs converge on one row per snapshot.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use dockstream_store::{ObjectStore, SnapshotKey};
use dockstream_warehouse::{StatusRow, Warehouse};

use crate::error::PipelineError;
use crate::report::{RunReport, SkippedKey};
use crate::retry::{retry, RetryPolicy};
use crate::transform::transform;

/// Loader configuration
///
/// Retry budgets are per step: the ledger and listing calls are single-shot
/// and patient, per-snapshot reads are high-volume and cheap to retry, and
/// the batch load backs off longest because the warehouse is a shared
/// resource.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Key prefix under which snapshots live
    pub prefix: String,

    /// Concurrent per-snapshot read+transform workers
    pub concurrency: usize,

    /// Retry policy for the ledger query
    pub ledger_retry: RetryPolicy,

    /// Retry policy for listing the store
    pub list_retry: RetryPolicy,

    /// Retry policy for individual snapshot reads
    pub read_retry: RetryPolicy,

    /// Retry policy for the batch load
    pub load_retry: RetryPolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            prefix: "raw/station_status/".into(),
            concurrency: 4,
            ledger_retry: RetryPolicy::fixed(2, Duration::from_secs(10)),
            list_retry: RetryPolicy::fixed(2, Duration::from_secs(10)),
            read_retry: RetryPolicy::fixed(3, Duration::from_secs(5)),
            load_retry: RetryPolicy::fixed(2, Duration::from_secs(30)),
        }
    }
}

/// The incremental load pipeline
pub struct Loader {
    store: Arc<dyn ObjectStore>,
    warehouse: Arc<dyn Warehouse>,
    config: LoaderConfig,
}

impl Loader {
    /// Create a loader over a store and warehouse
    pub fn new(
        store: Arc<dyn ObjectStore>,
        warehouse: Arc<dyn Warehouse>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            store,
            warehouse,
            config,
        }
    }

    /// Execute one run
    ///
    /// Returns a [`RunReport`] on success - including the zero-candidate
    /// case - and [`PipelineError`] only when listing or the final load
    /// exhausts its retry budget. Cancelling stops admitting new per-item
    /// work; in-flight items finish and already-transformed rows are still
    /// loaded.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<RunReport, PipelineError> {
        // Ledger read. Exhaustion downgrades to an empty ledger: a missing
        // table on first run must not be fatal, and a full reload converges.
        let loaded = match retry(&self.config.ledger_retry, "ledger query", || {
            self.warehouse.loaded_timestamps()
        })
        .await
        {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "ledger unavailable, treating as empty (full reload)");
                HashSet::new()
            }
        };

        // List the store.
        let keys = retry(&self.config.list_retry, "list snapshots", || {
            self.store.list(&self.config.prefix)
        })
        .await
        .map_err(PipelineError::List)?;

        let candidates: Vec<String> = keys
            .into_iter()
            .filter(|key| key.ends_with(".json"))
            .collect();

        let mut report = RunReport::with_candidates(candidates.len());
        info!(
            candidates = report.candidates,
            already_loaded = loaded.len(),
            "listed snapshot store"
        );

        // Diff against the ledger.
        let work = self.filter_new(candidates, &loaded, &mut report);

        if work.is_empty() {
            info!("no new snapshots to load");
            return Ok(report);
        }
        info!(new = work.len(), "computed incremental work set");

        // Read and transform each new snapshot, isolating per-item failures.
        let rows = self.process(work, cancel, &mut report).await;

        if rows.is_empty() {
            warn!(skipped = report.skipped, "no rows survived processing");
            return Ok(report);
        }

        // Commit the batch.
        retry(&self.config.load_retry, "warehouse load", || {
            self.warehouse.append_rows(&rows)
        })
        .await
        .map_err(PipelineError::Load)?;

        report.loaded = rows.len();
        info!(
            candidates = report.candidates,
            loaded = report.loaded,
            skipped = report.skipped,
            "run complete"
        );
        Ok(report)
    }

    /// Keep keys whose filename timestamp is not in the ledger
    ///
    /// Keys that fail the grammar are recorded and skipped; already-loaded
    /// keys drop out silently.
    fn filter_new(
        &self,
        candidates: Vec<String>,
        loaded: &HashSet<String>,
        report: &mut RunReport,
    ) -> Vec<SnapshotKey> {
        let mut work = Vec::new();
        for key in candidates {
            match SnapshotKey::parse(&key) {
                Ok(parsed) => {
                    if loaded.contains(&parsed.timestamp_str()) {
                        debug!(key = %key, "already loaded, skipping");
                    } else {
                        work.push(parsed);
                    }
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "key does not match snapshot grammar");
                    report.record_skip(SkippedKey::new(key, e.to_string()));
                }
            }
        }
        work
    }

    /// Read and transform the work set with bounded concurrency
    ///
    /// Successful rows funnel into one shared buffer; each worker reports
    /// its own failure, so one bad snapshot never blocks the rest.
    async fn process(
        &self,
        work: Vec<SnapshotKey>,
        cancel: &CancellationToken,
        report: &mut RunReport,
    ) -> Vec<StatusRow> {
        let rows: Arc<Mutex<Vec<StatusRow>>> = Arc::new(Mutex::new(Vec::with_capacity(work.len())));
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut workers: JoinSet<Option<SkippedKey>> = JoinSet::new();

        for key in work {
            let store = Arc::clone(&self.store);
            let rows = Arc::clone(&rows);
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();
            let read_retry = self.config.read_retry.clone();

            workers.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return Some(SkippedKey::new(key.key(), "worker pool shut down"));
                };

                if cancel.is_cancelled() {
                    return Some(SkippedKey::new(key.key(), "run cancelled before processing"));
                }

                let payload = match retry(&read_retry, "read snapshot", || store.read(key.key()))
                    .await
                {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        warn!(key = %key, error = %e, "giving up on snapshot read");
                        return Some(SkippedKey::new(key.key(), e.to_string()));
                    }
                };

                match transform(&key, &payload) {
                    Ok(row) => {
                        rows.lock().push(row);
                        None
                    }
                    Err(e) => {
                        warn!(key = %key, error = %e, "malformed snapshot, skipping");
                        Some(SkippedKey::new(key.key(), e.to_string()))
                    }
                }
            });
        }

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Some(skip)) => report.record_skip(skip),
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "snapshot worker panicked");
                    report.record_skip(SkippedKey::new("<unknown>", format!("worker panicked: {e}")));
                }
            }
        }

        // All workers have joined; this is the only remaining handle.
        Arc::try_unwrap(rows)
            .map(Mutex::into_inner)
            .unwrap_or_else(|rows| rows.lock().clone())
    }
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

//! Pipeline errors

use thiserror::Error;

use crate::retry::RetryExhausted;

/// Run-level failures
///
/// Only two things can fail an entire run: not being able to list the
/// snapshot store, and not being able to commit the batch. Everything else
/// is either downgraded (ledger read) or isolated per key (read/transform).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Listing the snapshot store exhausted its retry budget
    #[error("failed to list snapshot store: {0}")]
    List(#[source] RetryExhausted),

    /// The batch load exhausted its retry budget
    ///
    /// Accumulated rows are not lost: the snapshots remain in the store and
    /// reappear in the next run's work set.
    #[error("failed to load batch into warehouse: {0}")]
    Load(#[source] RetryExhausted),
}

//! dockstream - Incremental load pipeline
//!
//! Determines which archived snapshots have not yet been materialized into
//! the warehouse, transforms them, and appends them as one batch. The
//! warehouse's own contents are the only checkpoint: every run recomputes
//! its work set from scratch, so repeated runs - including runs that
//! partially fail - converge on exactly one row per collection timestamp.
//!
//! ```text
//! [Ledger]──loaded──┐
//!                   ├──> [Filter] ──new keys──> [Read+Transform xN] ──rows──> [Load]
//! [Store]───keys────┘
//! ```
//!
//! Reliability model:
//! - every remote call runs under a [`RetryPolicy`] with a per-attempt timeout
//! - a ledger outage downgrades to a full reload instead of failing the run
//! - per-snapshot failures are isolated and reported, never escalated
//! - only list and load exhaustion fail a run; the report stays `Ok`
//!   for a zero-candidate run so the two are observably different

mod error;
mod loader;
mod report;
mod retry;
mod transform;

pub use error::PipelineError;
pub use loader::{Loader, LoaderConfig};
pub use report::{RunReport, SkippedKey};
pub use retry::{retry, Backoff, RetryExhausted, RetryPolicy, DEFAULT_ATTEMPT_TIMEOUT};
pub use transform::{transform, transform_station_info, TransformError};

//! Scheduler configuration

use serde::Deserialize;

/// Default interval between runs, in seconds (hourly)
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Scheduler configuration for `dockstream serve`
///
/// Each tick collects one snapshot and then runs the incremental load.
/// Ticks are sequential, so runs against the same table never overlap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between runs
    pub interval_secs: u64,

    /// Skip the collect step and only run the loader on each tick
    pub load_only: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            load_only: false,
        }
    }
}

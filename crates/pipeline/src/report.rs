//! Run reporting
//!
//! The externally observable contract of a run: how many snapshot keys were
//! seen, how many rows were loaded, and which keys were skipped with what
//! reason. A zero-candidate run is a successful report, never an error.

use serde::Serialize;

/// One key excluded from the batch, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedKey {
    /// The snapshot key
    pub key: String,
    /// Why it was excluded
    pub reason: String,
}

impl SkippedKey {
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Snapshot keys found in the store
    pub candidates: usize,

    /// Rows appended to the warehouse
    pub loaded: usize,

    /// Keys excluded from the batch
    pub skipped: usize,

    /// Per-key exclusion details
    pub errors: Vec<SkippedKey>,
}

impl RunReport {
    /// Start a report for a run that found `candidates` keys
    pub fn with_candidates(candidates: usize) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    /// Record an excluded key
    pub fn record_skip(&mut self, skip: SkippedKey) {
        self.skipped += 1;
        self.errors.push(skip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_skip_keeps_count_in_sync() {
        let mut report = RunReport::with_candidates(3);
        report.record_skip(SkippedKey::new("a.json", "bad key"));
        report.record_skip(SkippedKey::new("b.json", "bad payload"));

        assert_eq!(report.candidates, 3);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_serializes_to_json_contract() {
        let mut report = RunReport::with_candidates(2);
        report.loaded = 1;
        report.record_skip(SkippedKey::new("x.json", "unreadable"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["candidates"], 2);
        assert_eq!(json["loaded"], 1);
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["errors"][0]["key"], "x.json");
        assert_eq!(json["errors"][0]["reason"], "unreadable");
    }
}

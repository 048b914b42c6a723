//! Aggregate result of a bulk completion job.

use serde::{Deserialize, Serialize};

/// Outcome counts of a bulk completion run.
///
/// `completed + failed == total` holds for every summary produced by a
/// finished run; `total` is the size of the snapshot taken at job start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// Items successfully marked completed.
    pub completed: u64,
    /// Items whose update failed.
    pub failed: u64,
    /// Items in the snapshot.
    pub total: u64,
}

impl CompletionSummary {
    /// A summary for a snapshot of `total` items, nothing processed yet.
    pub fn for_snapshot(total: u64) -> Self {
        Self {
            completed: 0,
            failed: 0,
            total,
        }
    }

    /// Items processed so far.
    pub fn processed(&self) -> u64 {
        self.completed + self.failed
    }

    /// Whether every item of the snapshot has been attempted.
    pub fn is_settled(&self) -> bool {
        self.processed() == self.total
    }
}

//! Progress reporting contract between a running job and its host.

use async_trait::async_trait;

/// Outcome of processing a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was updated.
    Completed,
    /// The update failed; processing moved on.
    Failed {
        /// Error reported by the store.
        reason: String,
    },
}

/// Structured per-item event emitted while a job runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEvent {
    /// Item the event is about.
    pub item_id: i64,
    /// What happened to it.
    pub outcome: ItemOutcome,
}

impl ItemEvent {
    /// Event for a successfully updated item.
    pub fn completed(item_id: i64) -> Self {
        Self {
            item_id,
            outcome: ItemOutcome::Completed,
        }
    }

    /// Event for an item whose update failed.
    pub fn failed(item_id: i64, reason: impl Into<String>) -> Self {
        Self {
            item_id,
            outcome: ItemOutcome::Failed {
                reason: reason.into(),
            },
        }
    }
}

/// Receives progress values and item events from a running job.
///
/// The queue hands each job a sink bound to its own record; tests use a
/// recording implementation.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Report overall progress in `[0, 100]`.
    async fn progress(&self, value: u8);

    /// Observe the outcome of one item.
    fn record(&self, event: &ItemEvent) {
        let _ = event;
    }
}

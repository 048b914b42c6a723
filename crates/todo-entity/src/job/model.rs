//! Job entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::JobState;

/// Highest progress value a job can report.
pub const MAX_PROGRESS: u8 = 100;

/// A background job held by the in-process queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Unique job identifier, assigned at submission.
    pub id: Uuid,
    /// Job name used to pick a handler (e.g. `"complete-all-items"`).
    pub name: String,
    /// Job-specific payload (JSON). Never changes after submission.
    pub payload: serde_json::Value,
    /// Current state.
    pub state: JobState,
    /// Progress in `[0, 100]`.
    pub progress: u8,
    /// Return value of a completed job.
    pub result: Option<serde_json::Value>,
    /// Error message of a failed job.
    pub error_message: Option<String>,
    /// When the job was submitted.
    pub created_at: DateTime<Utc>,
    /// When a worker picked the job up.
    pub started_at: Option<DateTime<Utc>>,
    /// When the job reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a freshly submitted job.
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            payload,
            state: JobState::Queued,
            progress: 0,
            result: None,
            error_message: None,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Mark the job as picked up by a worker.
    pub fn start(&mut self) {
        self.state = JobState::Active;
        self.started_at = Some(Utc::now());
    }

    /// Record a progress value, clamped to `[0, 100]`.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(MAX_PROGRESS);
    }

    /// Mark the job as completed with its return value.
    pub fn complete(&mut self, result: Option<serde_json::Value>) {
        self.state = JobState::Completed;
        self.result = result;
        self.finished_at = Some(Utc::now());
    }

    /// Mark the job as failed. A failed job carries no result.
    pub fn fail(&mut self, error_message: impl Into<String>) {
        self.state = JobState::Failed;
        self.result = None;
        self.error_message = Some(error_message.into());
        self.finished_at = Some(Utc::now());
    }
}

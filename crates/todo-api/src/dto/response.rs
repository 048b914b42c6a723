//! Response DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use todo_entity::job::JobState;
use todo_worker::{JobHandle, QueueStats};

/// Response to a bulk completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmittedResponse {
    /// Identifier to poll with.
    pub job_id: Uuid,
    /// Human-readable message.
    pub message: String,
    /// Status URL relative to the items collection.
    pub status_url: String,
}

impl JobSubmittedResponse {
    /// Response for a freshly submitted bulk completion job.
    pub fn started(job_id: Uuid) -> Self {
        Self {
            job_id,
            message: "Started completing all items".to_string(),
            status_url: format!("job-status/{job_id}"),
        }
    }
}

/// Polled state of a job. `result` is `null` until the job completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusResponse {
    /// Job ID.
    pub id: Uuid,
    /// Current state.
    pub state: JobState,
    /// Progress in `[0, 100]`.
    pub progress: u8,
    /// Completion summary.
    pub result: Option<serde_json::Value>,
}

impl From<&JobHandle> for JobStatusResponse {
    fn from(handle: &JobHandle) -> Self {
        let job = handle.snapshot();
        Self {
            id: job.id,
            state: job.state,
            progress: job.progress,
            result: job.result,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Job counts of the items queue.
    pub queue: QueueStats,
}

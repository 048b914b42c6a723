//! In-process job queue with state, progress and result readback.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use todo_core::error::AppError;
use todo_core::result::AppResult;
use todo_entity::job::{Job, JobState};

use crate::progress::{ItemEvent, ItemOutcome, ProgressSink};

/// Shared view of one submitted job.
///
/// Cloning is cheap; every clone observes the same record. Only the worker
/// executing the job mutates it.
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: Uuid,
    inner: Arc<RwLock<Job>>,
}

impl JobHandle {
    fn new(job: Job) -> Self {
        Self {
            id: job.id,
            inner: Arc::new(RwLock::new(job)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Job> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, f: impl FnOnce(&mut Job)) {
        let mut job = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut job);
    }

    /// Job identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Job name.
    pub fn name(&self) -> String {
        self.read().name.clone()
    }

    /// Current state.
    pub fn state(&self) -> JobState {
        self.read().state
    }

    /// Last reported progress.
    pub fn progress(&self) -> u8 {
        self.read().progress
    }

    /// Stored return value; present only once the job completed.
    pub fn result(&self) -> Option<serde_json::Value> {
        self.read().result.clone()
    }

    /// Failure message of a failed job.
    pub fn error_message(&self) -> Option<String> {
        self.read().error_message.clone()
    }

    /// Point-in-time copy of the whole record.
    pub fn snapshot(&self) -> Job {
        self.read().clone()
    }

    pub(crate) fn start(&self) {
        self.update(Job::start);
    }

    pub(crate) fn complete(&self, result: Option<serde_json::Value>) {
        self.update(|job| job.complete(result));
    }

    pub(crate) fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|job| job.fail(message));
    }
}

#[async_trait]
impl ProgressSink for JobHandle {
    async fn progress(&self, value: u8) {
        self.update(|job| job.set_progress(value));
    }

    fn record(&self, event: &ItemEvent) {
        match &event.outcome {
            ItemOutcome::Completed => {
                tracing::debug!(job_id = %self.id, item_id = event.item_id, "Item completed");
            }
            ItemOutcome::Failed { reason } => {
                tracing::warn!(
                    job_id = %self.id,
                    item_id = event.item_id,
                    error = %reason,
                    "Failed to complete item"
                );
            }
        }
    }
}

/// Receiving end of a [`JobQueue`], owned by the worker runner.
#[derive(Debug)]
pub struct JobReceiver {
    rx: mpsc::UnboundedReceiver<JobHandle>,
}

impl JobReceiver {
    /// Wait for the next submitted job. `None` once every queue clone is gone.
    pub async fn recv(&mut self) -> Option<JobHandle> {
        self.rx.recv().await
    }

    /// Stop accepting jobs and return the ones still waiting.
    pub fn close(&mut self) -> Vec<JobHandle> {
        self.rx.close();
        let mut pending = Vec::new();
        while let Ok(handle) = self.rx.try_recv() {
            pending.push(handle);
        }
        pending
    }
}

/// Job queue for submitting work and polling job status.
///
/// Jobs are kept for the life of the process, finished ones included, so
/// status stays readable after completion. Nothing evicts them.
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Queue name, used in logs.
    name: String,
    /// Every submitted job by ID.
    jobs: Arc<DashMap<Uuid, JobHandle>>,
    /// Hand-off to the worker runner.
    sender: mpsc::UnboundedSender<JobHandle>,
}

impl JobQueue {
    /// Create a queue and the receiver a worker runner consumes.
    pub fn channel(name: impl Into<String>) -> (Self, JobReceiver) {
        let (sender, rx) = mpsc::unbounded_channel();
        let queue = Self {
            name: name.into(),
            jobs: Arc::new(DashMap::new()),
            sender,
        };
        (queue, JobReceiver { rx })
    }

    /// Submit a new job. It starts in the `queued` state.
    pub fn submit(
        &self,
        job_name: impl Into<String>,
        payload: serde_json::Value,
    ) -> AppResult<JobHandle> {
        let handle = JobHandle::new(Job::new(job_name, payload));
        let job_id = handle.id();

        self.jobs.insert(job_id, handle.clone());

        if self.sender.send(handle.clone()).is_err() {
            self.jobs.remove(&job_id);
            return Err(AppError::service_unavailable(format!(
                "Queue '{}' is not accepting jobs",
                self.name
            )));
        }

        tracing::debug!(
            "Enqueued job: id={}, name='{}', queue='{}'",
            job_id,
            handle.name(),
            self.name
        );

        Ok(handle)
    }

    /// Look up a job by ID.
    pub fn get_job(&self, job_id: Uuid) -> Option<JobHandle> {
        self.jobs.get(&job_id).map(|entry| entry.value().clone())
    }

    /// Count jobs per state.
    pub fn stats(&self) -> QueueStats {
        let mut stats = QueueStats {
            queue: self.name.clone(),
            ..QueueStats::default()
        };

        for entry in self.jobs.iter() {
            match entry.value().state() {
                JobState::Queued => stats.queued += 1,
                JobState::Active => stats.active += 1,
                JobState::Completed => stats.completed += 1,
                JobState::Failed => stats.failed += 1,
            }
        }

        stats
    }
}

/// Queue statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    /// Queue name
    pub queue: String,
    /// Jobs waiting for a worker slot
    pub queued: u64,
    /// Jobs currently running
    pub active: u64,
    /// Jobs that finished with a result
    pub completed: u64,
    /// Jobs that failed
    pub failed: u64,
}

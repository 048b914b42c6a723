//! Job executor that dispatches jobs to registered handlers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use todo_core::error::AppError;
use todo_entity::job::Job;

use crate::progress::ProgressSink;

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Job name this handler processes
    fn job_name(&self) -> &str;

    /// Execute the job, reporting progress through `progress`
    async fn execute(
        &self,
        job: &Job,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Value>, JobExecutionError>;
}

/// Error from job execution. Jobs are never retried.
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// The job cannot succeed as submitted
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Dispatches jobs to the appropriate handler based on the job name
#[derive(Debug)]
pub struct JobExecutor {
    /// Registered job handlers by name
    handlers: HashMap<String, Arc<dyn JobHandler>>,
}

impl JobExecutor {
    /// Create a new job executor
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a job handler
    pub fn register(&mut self, handler: Arc<dyn JobHandler>) {
        let job_name = handler.job_name().to_string();
        tracing::info!("Registered job handler for '{}'", job_name);
        self.handlers.insert(job_name, handler);
    }

    /// Execute a job by dispatching to the correct handler
    pub async fn execute(
        &self,
        job: &Job,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Value>, JobExecutionError> {
        let handler = self.handlers.get(&job.name).ok_or_else(|| {
            JobExecutionError::Permanent(format!(
                "No handler registered for job '{}'",
                job.name
            ))
        })?;

        tracing::info!("Executing job: id={}, name='{}'", job.id, job.name);

        handler.execute(job, progress).await
    }

    /// Get the list of registered job names
    pub fn registered_names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }
}

impl Default for JobExecutor {
    fn default() -> Self {
        Self::new()
    }
}

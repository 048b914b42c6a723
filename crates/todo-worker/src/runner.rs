//! Worker runner: main loop that takes queued jobs and executes them.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore, watch};

use todo_core::config::WorkerConfig;

use crate::executor::{JobExecutionError, JobExecutor};
use crate::queue::{JobHandle, JobReceiver};

/// Failure message for jobs still waiting when the worker stops.
const SHUTDOWN_MESSAGE: &str = "Worker shut down before the job started";

/// Main worker runner that executes submitted jobs with bounded concurrency
#[derive(Debug)]
pub struct WorkerRunner {
    /// Jobs handed over by the queue
    receiver: JobReceiver,
    /// Job executor for dispatching
    executor: Arc<JobExecutor>,
    /// Worker configuration
    config: WorkerConfig,
}

impl WorkerRunner {
    /// Create a new worker runner
    pub fn new(receiver: JobReceiver, executor: Arc<JobExecutor>, config: WorkerConfig) -> Self {
        Self {
            receiver,
            executor,
            config,
        }
    }

    /// Run until the cancel signal turns `true`.
    ///
    /// Jobs still waiting at that point are failed; in-flight jobs get up
    /// to `shutdown_timeout_seconds` to finish.
    pub async fn run(mut self, mut cancel: watch::Receiver<bool>) {
        let concurrency = self.config.concurrency.max(1);

        tracing::info!("Worker started with concurrency={}", concurrency);

        let semaphore = Arc::new(Semaphore::new(concurrency));

        loop {
            let permit = tokio::select! {
                biased;
                _ = cancelled(&mut cancel) => break,
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(p) => p,
                    Err(_) => break,
                },
            };

            let handle = tokio::select! {
                biased;
                _ = cancelled(&mut cancel) => break,
                next = self.receiver.recv() => match next {
                    Some(h) => h,
                    None => break,
                },
            };

            self.spawn_job(handle, permit);
        }

        tracing::info!("Worker received shutdown signal");

        let pending = self.receiver.close();
        if !pending.is_empty() {
            tracing::warn!("Failing {} jobs that never started", pending.len());
        }
        for handle in pending {
            handle.fail(SHUTDOWN_MESSAGE);
        }

        tracing::info!("Worker waiting for in-flight jobs to complete...");

        let max_permits = u32::try_from(concurrency).unwrap_or(u32::MAX);
        let grace = Duration::from_secs(self.config.shutdown_timeout_seconds);
        if tokio::time::timeout(grace, semaphore.acquire_many(max_permits))
            .await
            .is_err()
        {
            tracing::warn!("Timed out waiting for in-flight jobs after {:?}", grace);
        }

        tracing::info!("Worker shut down complete");
    }

    /// Execute one job in its own task, holding a worker slot until it ends
    fn spawn_job(&self, handle: JobHandle, permit: OwnedSemaphorePermit) {
        let executor = Arc::clone(&self.executor);

        tokio::spawn(async move {
            let _permit = permit;
            let job_id = handle.id();

            handle.start();
            let job = handle.snapshot();

            tracing::info!("Processing job: id={}, name='{}'", job_id, job.name);

            let sink = handle.clone();
            let outcome =
                tokio::spawn(async move { executor.execute(&job, &sink).await }).await;

            match outcome {
                Ok(Ok(result)) => {
                    handle.complete(result);
                    tracing::info!("Job {} completed successfully", job_id);
                }
                Ok(Err(JobExecutionError::Permanent(msg))) => {
                    tracing::error!("Job {} failed permanently: {}", job_id, msg);
                    handle.fail(msg);
                }
                Ok(Err(JobExecutionError::Internal(err))) => {
                    let msg = err.to_string();
                    tracing::error!("Job {} internal error: {}", job_id, msg);
                    handle.fail(msg);
                }
                Err(join_err) => {
                    tracing::error!("Job {} aborted: {}", job_id, join_err);
                    handle.fail(format!("Job aborted: {join_err}"));
                }
            }
        });
    }
}

/// Resolves once the cancel flag is `true` or its sender is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let _ = cancel.wait_for(|stop| *stop).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::{Value, json};
    use todo_core::ErrorKind;
    use todo_core::error::AppError;
    use todo_entity::job::{Job, JobState};

    use crate::executor::JobHandler;
    use crate::progress::ProgressSink;
    use crate::queue::JobQueue;

    #[derive(Debug)]
    struct StepHandler;

    #[async_trait]
    impl JobHandler for StepHandler {
        fn job_name(&self) -> &str {
            "steps"
        }

        async fn execute(
            &self,
            job: &Job,
            progress: &dyn ProgressSink,
        ) -> Result<Option<Value>, JobExecutionError> {
            match job.payload["mode"].as_str() {
                Some("panic") => panic!("handler blew up"),
                Some("fail") => Err(AppError::database("connection reset").into()),
                _ => {
                    progress.progress(50).await;
                    progress.progress(100).await;
                    Ok(Some(json!({ "done": true })))
                }
            }
        }
    }

    fn executor() -> Arc<JobExecutor> {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(StepHandler));
        Arc::new(executor)
    }

    fn config() -> WorkerConfig {
        WorkerConfig {
            enabled: true,
            concurrency: 2,
            shutdown_timeout_seconds: 5,
        }
    }

    async fn wait_terminal(handle: &JobHandle) -> JobState {
        for _ in 0..500 {
            let state = handle.state();
            if state.is_terminal() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.state()
    }

    #[tokio::test]
    async fn test_runs_job_to_completion() {
        let (queue, receiver) = JobQueue::channel("items");
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let worker = tokio::spawn(WorkerRunner::new(receiver, executor(), config()).run(cancel_rx));

        let handle = queue.submit("steps", json!({})).unwrap();

        assert_eq!(wait_terminal(&handle).await, JobState::Completed);
        assert_eq!(handle.progress(), 100);
        assert_eq!(handle.result(), Some(json!({ "done": true })));

        cancel_tx.send(true).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_handler_error_fails_job_without_result() {
        let (queue, receiver) = JobQueue::channel("items");
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let worker = tokio::spawn(WorkerRunner::new(receiver, executor(), config()).run(cancel_rx));

        let handle = queue.submit("steps", json!({ "mode": "fail" })).unwrap();

        assert_eq!(wait_terminal(&handle).await, JobState::Failed);
        assert!(handle.result().is_none());
        assert!(handle.error_message().unwrap().contains("connection reset"));

        cancel_tx.send(true).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_job_name_fails() {
        let (queue, receiver) = JobQueue::channel("items");
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let worker = tokio::spawn(WorkerRunner::new(receiver, executor(), config()).run(cancel_rx));

        let handle = queue.submit("nope", json!({})).unwrap();

        assert_eq!(wait_terminal(&handle).await, JobState::Failed);
        assert!(handle.error_message().unwrap().contains("No handler"));

        cancel_tx.send(true).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_panicking_handler_fails_job() {
        let (queue, receiver) = JobQueue::channel("items");
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let worker = tokio::spawn(WorkerRunner::new(receiver, executor(), config()).run(cancel_rx));

        let handle = queue.submit("steps", json!({ "mode": "panic" })).unwrap();

        assert_eq!(wait_terminal(&handle).await, JobState::Failed);

        let next = queue.submit("steps", json!({})).unwrap();
        assert_eq!(wait_terminal(&next).await, JobState::Completed);

        cancel_tx.send(true).unwrap();
        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_fails_waiting_jobs() {
        let (queue, receiver) = JobQueue::channel("items");
        let (cancel_tx, cancel_rx) = watch::channel(false);

        let first = queue.submit("steps", json!({})).unwrap();
        let second = queue.submit("steps", json!({})).unwrap();

        cancel_tx.send(true).unwrap();
        WorkerRunner::new(receiver, executor(), config())
            .run(cancel_rx)
            .await;

        for handle in [first, second] {
            assert_eq!(handle.state(), JobState::Failed);
            assert_eq!(handle.error_message().as_deref(), Some(SHUTDOWN_MESSAGE));
        }

        let err = queue.submit("steps", json!({})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceUnavailable);
    }
}

//! Background job processing for the todo service.
//!
//! This crate provides:
//! - An in-process job queue with state, progress and result readback
//! - A job executor that dispatches jobs to the correct handler
//! - A worker runner that executes queued jobs with bounded concurrency
//! - The bulk item completion job

pub mod executor;
pub mod jobs;
pub mod progress;
pub mod queue;
pub mod runner;

pub use executor::{JobExecutionError, JobExecutor, JobHandler};
pub use jobs::complete_all::{CompleteAllItemsHandler, ItemStore, complete_all_items};
pub use progress::{ItemEvent, ItemOutcome, ProgressSink};
pub use queue::{JobHandle, JobQueue, JobReceiver, QueueStats};
pub use runner::WorkerRunner;

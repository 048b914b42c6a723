//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use todo_core::config::AppConfig;
use todo_database::DatabasePool;
use todo_service::{ItemService, TodoListService};
use todo_worker::JobQueue;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db: DatabasePool,
    /// Todo list service
    pub list_service: Arc<TodoListService>,
    /// Item service
    pub item_service: Arc<ItemService>,
    /// Queue for bulk item jobs
    pub job_queue: JobQueue,
}

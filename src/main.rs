//! Todo Server: todo lists, items and bulk completion jobs.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use todo_core::config::AppConfig;
use todo_core::error::AppError;
use todo_database::{DatabasePool, ItemRepository, TodoListRepository};
use todo_entity::job::ITEMS_QUEUE;
use todo_service::{ItemService, TodoListService};
use todo_worker::{CompleteAllItemsHandler, JobExecutor, JobQueue, WorkerRunner};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("TODO_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting todo-server v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;

    if config.database.run_migrations {
        todo_database::migration::run_migrations(db.pool()).await?;
    }

    // ── Step 2: Repositories and services ────────────────────────
    let list_repo = Arc::new(TodoListRepository::new(db.pool().clone()));
    let item_repo = Arc::new(ItemRepository::new(db.pool().clone()));

    let list_service = Arc::new(TodoListService::new(Arc::clone(&list_repo)));
    let item_service = Arc::new(ItemService::new(
        Arc::clone(&item_repo),
        Arc::clone(&list_repo),
    ));

    // ── Step 3: Job queue + background worker ────────────────────
    let (job_queue, receiver) = JobQueue::channel(ITEMS_QUEUE);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_handle = if config.worker.enabled {
        let mut job_executor = JobExecutor::new();
        job_executor.register(Arc::new(CompleteAllItemsHandler::new(item_repo)));
        tracing::info!(handlers = ?job_executor.registered_names(), "Job handlers ready");

        let worker_runner =
            WorkerRunner::new(receiver, Arc::new(job_executor), config.worker.clone());
        let handle = tokio::spawn(worker_runner.run(shutdown_rx));

        tracing::info!("Background worker started");
        Some(handle)
    } else {
        // Dropping the receiver makes submissions fail with 503.
        drop(receiver);
        tracing::info!("Background worker disabled");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let app_state = todo_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        list_service,
        item_service,
        job_queue,
    };

    let app = todo_api::build_app(app_state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Todo server listening on {}", addr);

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    if let Some(handle) = worker_handle {
        tracing::info!("Waiting for background worker to stop...");
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Background worker did not stop within {:?}", grace);
        }
    }

    db.close().await;

    tracing::info!("Todo server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

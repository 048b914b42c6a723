//! Schema migrations for `todo_lists` and `items`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use todo_core::error::{AppError, ErrorKind};

/// Migrations embedded from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every embedded migration the database has not seen yet.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        available = MIGRATOR.iter().count(),
        "Applying todo schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Todo schema migration failed: {e}"),
            e,
        )
    })?;

    info!("Todo schema is up to date");
    Ok(())
}

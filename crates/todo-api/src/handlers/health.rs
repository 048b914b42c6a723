//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database = match state.db.health_check().await {
        Ok(true) => "connected",
        Ok(false) => "degraded",
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            "unavailable"
        }
    };

    let status = if database == "connected" { "ok" } else { "degraded" };

    Json(DetailedHealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        queue: state.job_queue.stats(),
    })
}

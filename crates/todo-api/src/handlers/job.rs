//! Bulk completion job handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use todo_core::error::AppError;
use todo_entity::job::{COMPLETE_ALL_ITEMS, CompleteAllItemsPayload};

use crate::dto::response::{JobStatusResponse, JobSubmittedResponse};
use crate::error::ApiError;
use crate::extractors::parse_job_id;
use crate::state::AppState;

/// POST /api/todoLists/{todoListId}/items/completeAll
pub async fn complete_all_items(
    State(state): State<AppState>,
    Path(todo_list_id): Path<i64>,
) -> Result<(StatusCode, Json<JobSubmittedResponse>), ApiError> {
    let payload = serde_json::to_value(CompleteAllItemsPayload {
        list_id: todo_list_id,
    })
    .map_err(AppError::from)?;

    let job = state.job_queue.submit(COMPLETE_ALL_ITEMS, payload)?;

    tracing::info!(job_id = %job.id(), todo_list_id, "Queued bulk item completion");

    Ok((
        StatusCode::ACCEPTED,
        Json(JobSubmittedResponse::started(job.id())),
    ))
}

/// GET /api/todoLists/{todoListId}/items/job-status/{jobId}
pub async fn get_job_status(
    State(state): State<AppState>,
    Path((_todo_list_id, job_id)): Path<(i64, String)>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let job_id = parse_job_id(&job_id)?;

    let job = state
        .job_queue
        .get_job(job_id)
        .ok_or_else(|| AppError::not_found("Job not found"))?;

    Ok(Json(JobStatusResponse::from(&job)))
}

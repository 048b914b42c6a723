//! Todo list CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use todo_entity::todo_list::TodoList;

use crate::dto::request::{CreateTodoListRequest, UpdateTodoListRequest};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/todoLists
pub async fn list_todo_lists(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoList>>, ApiError> {
    Ok(Json(state.list_service.all().await?))
}

/// GET /api/todoLists/{todoListId}
pub async fn get_todo_list(
    State(state): State<AppState>,
    Path(todo_list_id): Path<i64>,
) -> Result<Json<TodoList>, ApiError> {
    Ok(Json(state.list_service.get(todo_list_id).await?))
}

/// POST /api/todoLists
pub async fn create_todo_list(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTodoListRequest>,
) -> Result<(StatusCode, Json<TodoList>), ApiError> {
    let list = state.list_service.create(&req.name).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// PUT /api/todoLists/{todoListId}
pub async fn update_todo_list(
    State(state): State<AppState>,
    Path(todo_list_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateTodoListRequest>,
) -> Result<Json<TodoList>, ApiError> {
    Ok(Json(
        state.list_service.update(todo_list_id, &req.name).await?,
    ))
}

/// DELETE /api/todoLists/{todoListId}
pub async fn delete_todo_list(
    State(state): State<AppState>,
    Path(todo_list_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.list_service.delete(todo_list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Item CRUD handlers, scoped to the owning todo list.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use todo_entity::item::Item;

use crate::dto::request::{CreateItemRequest, UpdateItemRequest};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// GET /api/todoLists/{todoListId}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path(todo_list_id): Path<i64>,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.item_service.all(todo_list_id).await?))
}

/// GET /api/todoLists/{todoListId}/items/{itemId}
pub async fn get_item(
    State(state): State<AppState>,
    Path((todo_list_id, item_id)): Path<(i64, i64)>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.item_service.get(todo_list_id, item_id).await?))
}

/// POST /api/todoLists/{todoListId}/items
pub async fn create_item(
    State(state): State<AppState>,
    Path(todo_list_id): Path<i64>,
    ValidatedJson(req): ValidatedJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let item = state
        .item_service
        .create(todo_list_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/todoLists/{todoListId}/items/{itemId}
pub async fn update_item(
    State(state): State<AppState>,
    Path((todo_list_id, item_id)): Path<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let item = state
        .item_service
        .update(todo_list_id, item_id, req.into())
        .await?;
    Ok(Json(item))
}

/// DELETE /api/todoLists/{todoListId}/items/{itemId}
pub async fn delete_item(
    State(state): State<AppState>,
    Path((todo_list_id, item_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.item_service.delete(todo_list_id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

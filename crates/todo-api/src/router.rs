//! Route definitions for the todo HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route, bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(todo_list_routes())
        .merge(item_routes())
        .merge(job_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Todo list CRUD
fn todo_list_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todoLists",
            get(handlers::todo_list::list_todo_lists).post(handlers::todo_list::create_todo_list),
        )
        .route(
            "/todoLists/{todoListId}",
            get(handlers::todo_list::get_todo_list)
                .put(handlers::todo_list::update_todo_list)
                .delete(handlers::todo_list::delete_todo_list),
        )
}

/// Item CRUD within a list
fn item_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todoLists/{todoListId}/items",
            get(handlers::item::list_items).post(handlers::item::create_item),
        )
        .route(
            "/todoLists/{todoListId}/items/{itemId}",
            get(handlers::item::get_item)
                .put(handlers::item::update_item)
                .delete(handlers::item::delete_item),
        )
}

/// Bulk completion and job polling
fn job_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/todoLists/{todoListId}/items/completeAll",
            post(handlers::job::complete_all_items),
        )
        .route(
            "/todoLists/{todoListId}/items/job-status/{jobId}",
            get(handlers::job::get_job_status),
        )
}

/// Health endpoints
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

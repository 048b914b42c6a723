//! Todo list repository implementation.

use sqlx::PgPool;

use todo_core::error::{AppError, ErrorKind};
use todo_core::result::AppResult;
use todo_entity::todo_list::{CreateTodoList, TodoList};

/// Repository for todo list CRUD.
#[derive(Debug, Clone)]
pub struct TodoListRepository {
    pool: PgPool,
}

impl TodoListRepository {
    /// Create a new todo list repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every todo list, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<TodoList>> {
        sqlx::query_as::<_, TodoList>("SELECT id, name FROM todo_lists ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list todo lists", e))
    }

    /// Find a todo list by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<TodoList>> {
        sqlx::query_as::<_, TodoList>("SELECT id, name FROM todo_lists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find todo list", e))
    }

    /// Create a new todo list.
    pub async fn create(&self, data: &CreateTodoList) -> AppResult<TodoList> {
        sqlx::query_as::<_, TodoList>(
            "INSERT INTO todo_lists (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&data.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create todo list", e))
    }

    /// Rename a todo list.
    pub async fn rename(&self, id: i64, name: &str) -> AppResult<Option<TodoList>> {
        sqlx::query_as::<_, TodoList>(
            "UPDATE todo_lists SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename todo list", e))
    }

    /// Delete a todo list and, through the foreign key, its items.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM todo_lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete todo list", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

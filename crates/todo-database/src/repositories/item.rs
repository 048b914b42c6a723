//! Item repository implementation.

use sqlx::PgPool;

use todo_core::error::{AppError, ErrorKind};
use todo_core::result::AppResult;
use todo_entity::item::{CreateItem, Item, ItemChanges};

const ITEM_COLUMNS: &str = "id, todo_list_id, title, description, status";

/// Repository for item CRUD.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the items of a list ordered by status descending, then title.
    ///
    /// `id` breaks ties so repeated reads of unchanged rows return the same order.
    pub async fn find_by_list(&self, todo_list_id: i64) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE todo_list_id = $1 \
             ORDER BY status DESC, title ASC, id ASC"
        ))
        .bind(todo_list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))
    }

    /// Find an item by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    /// Create a new item.
    pub async fn create(&self, data: &CreateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO items (todo_list_id, title, description, status) \
             VALUES ($1, $2, $3, $4) RETURNING {ITEM_COLUMNS}"
        ))
        .bind(data.todo_list_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("items_todo_list_id_fkey") =>
            {
                AppError::not_found(format!("Todo list {} not found", data.todo_list_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create item", e),
        })
    }

    /// Apply a partial update and return the updated row.
    ///
    /// Fails with `NotFound` when no item has the given ID.
    pub async fn update(&self, id: i64, changes: &ItemChanges) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(&format!(
            "UPDATE items SET \
                title = COALESCE($2, title), \
                status = COALESCE($3, status), \
                description = COALESCE($4, description) \
             WHERE id = $1 RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.status)
        .bind(&changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }
}

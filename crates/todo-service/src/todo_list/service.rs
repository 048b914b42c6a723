//! Todo list CRUD operations.

use std::sync::Arc;

use tracing::info;

use todo_core::error::AppError;
use todo_database::repositories::todo_list::TodoListRepository;
use todo_entity::todo_list::{CreateTodoList, TodoList};

/// Manages todo list CRUD operations.
#[derive(Debug, Clone)]
pub struct TodoListService {
    /// Todo list repository.
    list_repo: Arc<TodoListRepository>,
}

impl TodoListService {
    /// Creates a new todo list service.
    pub fn new(list_repo: Arc<TodoListRepository>) -> Self {
        Self { list_repo }
    }

    /// Lists every todo list.
    pub async fn all(&self) -> Result<Vec<TodoList>, AppError> {
        self.list_repo.find_all().await
    }

    /// Gets a todo list by ID.
    pub async fn get(&self, id: i64) -> Result<TodoList, AppError> {
        self.list_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Todo list {id} not found")))
    }

    /// Creates a new todo list.
    pub async fn create(&self, name: &str) -> Result<TodoList, AppError> {
        let name = validate_name(name)?;
        let list = self
            .list_repo
            .create(&CreateTodoList {
                name: name.to_string(),
            })
            .await?;

        info!(list_id = list.id, name = %list.name, "Todo list created");
        Ok(list)
    }

    /// Renames a todo list.
    pub async fn update(&self, id: i64, name: &str) -> Result<TodoList, AppError> {
        let name = validate_name(name)?;
        self.list_repo
            .rename(id, name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Todo list {id} not found")))
    }

    /// Deletes a todo list together with its items.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.list_repo.delete(id).await? {
            return Err(AppError::not_found(format!("Todo list {id} not found")));
        }

        info!(list_id = id, "Todo list deleted");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Todo list name cannot be empty"));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Groceries ").unwrap(), "Groceries");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        let err = validate_name("   ").unwrap_err();
        assert_eq!(err.kind, todo_core::ErrorKind::Validation);
    }
}

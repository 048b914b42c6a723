//! Item CRUD operations scoped to their owning list.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use todo_core::error::AppError;
use todo_database::repositories::item::ItemRepository;
use todo_database::repositories::todo_list::TodoListRepository;
use todo_entity::item::{CreateItem, Item, ItemChanges, status};

/// Manages item CRUD operations.
#[derive(Debug, Clone)]
pub struct ItemService {
    /// Item repository.
    item_repo: Arc<ItemRepository>,
    /// Todo list repository.
    list_repo: Arc<TodoListRepository>,
}

/// Request to create a new item in a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    /// Item title.
    pub title: String,
    /// Initial status (defaults to `"Pending"`).
    pub status: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl ItemService {
    /// Creates a new item service.
    pub fn new(item_repo: Arc<ItemRepository>, list_repo: Arc<TodoListRepository>) -> Self {
        Self {
            item_repo,
            list_repo,
        }
    }

    /// Lists the items of a list, ordered by status descending then title.
    pub async fn all(&self, list_id: i64) -> Result<Vec<Item>, AppError> {
        self.item_repo.find_by_list(list_id).await
    }

    /// Gets an item of a list.
    pub async fn get(&self, list_id: i64, item_id: i64) -> Result<Item, AppError> {
        self.item_repo
            .find_by_id(item_id)
            .await?
            .filter(|item| item.todo_list_id == list_id)
            .ok_or_else(|| item_not_found(list_id, item_id))
    }

    /// Creates a new item in a list.
    pub async fn create(&self, list_id: i64, req: CreateItemRequest) -> Result<Item, AppError> {
        let data = build_create(list_id, req)?;

        self.list_repo
            .find_by_id(list_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Todo list {list_id} not found")))?;

        let item = self.item_repo.create(&data).await?;
        info!(list_id, item_id = item.id, "Item created");
        Ok(item)
    }

    /// Applies a partial update to an item of a list.
    pub async fn update(
        &self,
        list_id: i64,
        item_id: i64,
        changes: ItemChanges,
    ) -> Result<Item, AppError> {
        let changes = validate_changes(changes)?;
        let current = self.get(list_id, item_id).await?;

        if changes.is_empty() {
            return Ok(current);
        }

        self.item_repo.update(item_id, &changes).await
    }

    /// Deletes an item of a list.
    pub async fn delete(&self, list_id: i64, item_id: i64) -> Result<(), AppError> {
        self.get(list_id, item_id).await?;

        if !self.item_repo.delete(item_id).await? {
            return Err(item_not_found(list_id, item_id));
        }

        info!(list_id, item_id, "Item deleted");
        Ok(())
    }
}

fn item_not_found(list_id: i64, item_id: i64) -> AppError {
    AppError::not_found(format!("Item {item_id} not found in todo list {list_id}"))
}

fn validate_title(title: &str) -> Result<String, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Item title cannot be empty"));
    }
    Ok(title.to_string())
}

fn build_create(list_id: i64, req: CreateItemRequest) -> Result<CreateItem, AppError> {
    let title = validate_title(&req.title)?;
    let status = match req.status {
        Some(s) if !s.trim().is_empty() => s,
        _ => status::PENDING.to_string(),
    };

    Ok(CreateItem {
        todo_list_id: list_id,
        title,
        status,
        description: req.description,
    })
}

fn validate_changes(changes: ItemChanges) -> Result<ItemChanges, AppError> {
    let title = changes.title.as_deref().map(validate_title).transpose()?;

    if matches!(changes.status.as_deref(), Some(s) if s.trim().is_empty()) {
        return Err(AppError::validation("Item status cannot be empty"));
    }

    Ok(ItemChanges { title, ..changes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::ErrorKind;

    #[test]
    fn test_create_defaults_status_to_pending() {
        let data = build_create(
            3,
            CreateItemRequest {
                title: " Buy milk ".to_string(),
                status: None,
                description: None,
            },
        )
        .unwrap();

        assert_eq!(data.todo_list_id, 3);
        assert_eq!(data.title, "Buy milk");
        assert_eq!(data.status, status::PENDING);
    }

    #[test]
    fn test_create_keeps_free_form_status() {
        let data = build_create(
            1,
            CreateItemRequest {
                title: "Paint fence".to_string(),
                status: Some("Blocked".to_string()),
                description: Some("needs primer".to_string()),
            },
        )
        .unwrap();

        assert_eq!(data.status, "Blocked");
        assert_eq!(data.description.as_deref(), Some("needs primer"));
    }

    #[test]
    fn test_create_rejects_empty_title() {
        let err = build_create(
            1,
            CreateItemRequest {
                title: "  ".to_string(),
                status: None,
                description: None,
            },
        )
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_changes_reject_blank_status() {
        let err = validate_changes(ItemChanges::status("")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_changes_trim_title() {
        let changes = validate_changes(ItemChanges {
            title: Some(" Walk dog ".to_string()),
            ..ItemChanges::default()
        })
        .unwrap();

        assert_eq!(changes.title.as_deref(), Some("Walk dog"));
        assert!(changes.status.is_none());
    }
}

//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use todo_entity::item::ItemChanges;

/// Create todo list request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTodoListRequest {
    /// List name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Rename todo list request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTodoListRequest {
    /// New list name.
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Create item request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    /// Item title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Initial status; `"Pending"` when omitted.
    pub status: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

impl From<CreateItemRequest> for todo_service::CreateItemRequest {
    fn from(req: CreateItemRequest) -> Self {
        Self {
            title: req.title,
            status: req.status,
            description: req.description,
        }
    }
}

/// Partial item update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    /// New title.
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    /// New status.
    #[validate(length(min = 1, message = "Status cannot be empty"))]
    pub status: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl From<UpdateItemRequest> for ItemChanges {
    fn from(req: UpdateItemRequest) -> Self {
        Self {
            title: req.title,
            status: req.status,
            description: req.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let req = CreateTodoListRequest {
            name: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_item_allows_missing_fields() {
        let req: UpdateItemRequest = serde_json::from_str(r#"{"status":"Completed"}"#).unwrap();
        assert!(req.validate().is_ok());

        let changes = ItemChanges::from(req);
        assert_eq!(changes, ItemChanges::completed());
    }

    #[test]
    fn test_update_item_rejects_empty_title() {
        let req = UpdateItemRequest {
            title: Some(String::new()),
            ..UpdateItemRequest::default()
        };
        assert!(req.validate().is_err());
    }
}

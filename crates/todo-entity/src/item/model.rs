//! Item entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status;

/// A todo entry belonging to exactly one list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique item identifier.
    pub id: i64,
    /// Owning list. Never changes after creation.
    pub todo_list_id: i64,
    /// Item title (non-empty).
    pub title: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Free-form status, e.g. `"Pending"` or `"Completed"`.
    pub status: String,
}

/// Data required to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItem {
    /// Owning list.
    pub todo_list_id: i64,
    /// Item title.
    pub title: String,
    /// Initial status.
    pub status: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial update of an item. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChanges {
    /// New title.
    pub title: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New description.
    pub description: Option<String>,
}

impl ItemChanges {
    /// Changes that only set the status.
    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    /// Changes that mark the item completed.
    pub fn completed() -> Self {
        Self::status(status::COMPLETED)
    }

    /// Whether no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.description.is_none()
    }
}

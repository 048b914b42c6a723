//! Todo list entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named collection of items. Deleting a list cascades to its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    /// Unique list identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Data required to create (or rename) a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoList {
    /// Display name.
    pub name: String,
}

//! Typed job payload definitions.

use serde::{Deserialize, Serialize};

/// Queue that bulk item jobs are submitted to.
pub const ITEMS_QUEUE: &str = "items";

/// Job name of the bulk completion job.
pub const COMPLETE_ALL_ITEMS: &str = "complete-all-items";

/// Payload of a bulk completion job: `{"listId": 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteAllItemsPayload {
    /// List whose items should all be completed.
    #[serde(rename = "listId", alias = "todoListId")]
    pub list_id: i64,
}

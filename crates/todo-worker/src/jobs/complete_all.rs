//! Bulk completion of every item in a todo list.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use todo_core::error::AppError;
use todo_core::result::AppResult;
use todo_database::repositories::item::ItemRepository;
use todo_entity::item::{Item, ItemChanges};
use todo_entity::job::model::MAX_PROGRESS;
use todo_entity::job::{COMPLETE_ALL_ITEMS, CompleteAllItemsPayload, CompletionSummary, Job};

use crate::executor::{JobExecutionError, JobHandler};
use crate::progress::{ItemEvent, ProgressSink};

/// Item persistence needed by the bulk completion job.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug {
    /// Items of a list, ordered by status descending then title ascending.
    async fn list_items(&self, list_id: i64) -> Result<Vec<Item>, AppError>;

    /// Apply changes to one item.
    async fn update_item(&self, item_id: i64, changes: &ItemChanges) -> Result<Item, AppError>;
}

#[async_trait]
impl ItemStore for ItemRepository {
    async fn list_items(&self, list_id: i64) -> Result<Vec<Item>, AppError> {
        self.find_by_list(list_id).await
    }

    async fn update_item(&self, item_id: i64, changes: &ItemChanges) -> Result<Item, AppError> {
        self.update(item_id, changes).await
    }
}

/// Mark every item of `list_id` completed, one at a time in snapshot order.
///
/// Only the snapshot fetch is fatal. A failed item update is counted and
/// reported to the sink, and processing continues with the next item.
/// Progress is emitted after each successful update as
/// `completed * 100 / total`, so failures never advance it.
pub async fn complete_all_items(
    store: &dyn ItemStore,
    list_id: i64,
    sink: &dyn ProgressSink,
) -> AppResult<CompletionSummary> {
    let items = store.list_items(list_id).await?;
    let mut summary = CompletionSummary::for_snapshot(items.len() as u64);

    if items.is_empty() {
        return Ok(summary);
    }

    let changes = ItemChanges::completed();

    for item in &items {
        match store.update_item(item.id, &changes).await {
            Ok(_) => {
                summary.completed += 1;
                sink.record(&ItemEvent::completed(item.id));
                sink.progress(percent(summary.completed, summary.total)).await;
            }
            Err(e) => {
                summary.failed += 1;
                sink.record(&ItemEvent::failed(item.id, e.message));
            }
        }
    }

    Ok(summary)
}

fn percent(done: u64, total: u64) -> u8 {
    u8::try_from(done * 100 / total).unwrap_or(MAX_PROGRESS)
}

/// Runs `complete-all-items` jobs.
#[derive(Debug)]
pub struct CompleteAllItemsHandler {
    /// Item persistence.
    store: Arc<dyn ItemStore>,
}

impl CompleteAllItemsHandler {
    /// Create a new handler over an item store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobHandler for CompleteAllItemsHandler {
    fn job_name(&self) -> &str {
        COMPLETE_ALL_ITEMS
    }

    async fn execute(
        &self,
        job: &Job,
        progress: &dyn ProgressSink,
    ) -> Result<Option<Value>, JobExecutionError> {
        let payload: CompleteAllItemsPayload = serde_json::from_value(job.payload.clone())
            .map_err(|e| JobExecutionError::Permanent(format!("Invalid payload: {e}")))?;

        let summary = complete_all_items(self.store.as_ref(), payload.list_id, progress).await?;

        tracing::info!(
            job_id = %job.id,
            list_id = payload.list_id,
            completed = summary.completed,
            failed = summary.failed,
            total = summary.total,
            "Completed all items"
        );

        let result = serde_json::to_value(summary).map_err(AppError::from)?;
        Ok(Some(result))
    }
}

//! End-to-end flow: submit a bulk completion job, run it on the worker and
//! poll state, progress and result through the queue.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::watch;

use todo_core::config::WorkerConfig;
use todo_core::error::AppError;
use todo_entity::item::{Item, ItemChanges, status};
use todo_entity::job::{COMPLETE_ALL_ITEMS, ITEMS_QUEUE, JobState};
use todo_worker::{CompleteAllItemsHandler, ItemStore, JobExecutor, JobHandle, JobQueue, WorkerRunner};

#[derive(Debug, Default)]
struct MemoryStore {
    items: Mutex<HashMap<i64, Item>>,
    reject: Vec<i64>,
}

impl MemoryStore {
    fn seed(list_id: i64, count: i64, reject: Vec<i64>) -> Self {
        let items = (1..=count)
            .map(|id| {
                let item = Item {
                    id,
                    todo_list_id: list_id,
                    title: format!("task {id:02}"),
                    description: None,
                    status: status::PENDING.to_string(),
                };
                (id, item)
            })
            .collect();
        Self {
            items: Mutex::new(items),
            reject,
        }
    }

    fn status_of(&self, id: i64) -> String {
        self.items.lock().unwrap()[&id].status.clone()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn list_items(&self, list_id: i64) -> Result<Vec<Item>, AppError> {
        let mut items: Vec<Item> = self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.todo_list_id == list_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.status.cmp(&a.status).then(a.title.cmp(&b.title)));
        Ok(items)
    }

    async fn update_item(&self, item_id: i64, changes: &ItemChanges) -> Result<Item, AppError> {
        if self.reject.contains(&item_id) {
            return Err(AppError::database("row locked"));
        }
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(&item_id)
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        if let Some(s) = &changes.status {
            item.status = s.clone();
        }
        Ok(item.clone())
    }
}

fn start_worker(store: Arc<MemoryStore>) -> (JobQueue, watch::Sender<bool>, tokio::task::JoinHandle<()>) {
    let (queue, receiver) = JobQueue::channel(ITEMS_QUEUE);
    let mut executor = JobExecutor::new();
    executor.register(Arc::new(CompleteAllItemsHandler::new(store)));

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let runner = WorkerRunner::new(receiver, Arc::new(executor), WorkerConfig::default());
    let worker = tokio::spawn(runner.run(cancel_rx));

    (queue, cancel_tx, worker)
}

async fn wait_terminal(handle: &JobHandle) -> JobState {
    for _ in 0..500 {
        if handle.state().is_terminal() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    handle.state()
}

#[tokio::test]
async fn test_completes_every_item_of_the_list() {
    let store = Arc::new(MemoryStore::seed(1, 5, Vec::new()));
    let (queue, cancel_tx, worker) = start_worker(store.clone());

    let handle = queue
        .submit(COMPLETE_ALL_ITEMS, json!({ "listId": 1 }))
        .unwrap();

    assert_eq!(wait_terminal(&handle).await, JobState::Completed);
    assert_eq!(handle.progress(), 100);
    assert_eq!(
        handle.result(),
        Some(json!({ "completed": 5, "failed": 0, "total": 5 }))
    );
    for id in 1..=5 {
        assert_eq!(store.status_of(id), status::COMPLETED);
    }

    cancel_tx.send(true).unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn test_partial_failure_is_reported_in_result() {
    let store = Arc::new(MemoryStore::seed(1, 4, vec![4]));
    let (queue, cancel_tx, worker) = start_worker(store.clone());

    let handle = queue
        .submit(COMPLETE_ALL_ITEMS, json!({ "listId": 1 }))
        .unwrap();

    assert_eq!(wait_terminal(&handle).await, JobState::Completed);
    assert_eq!(handle.progress(), 75);
    assert_eq!(
        handle.result(),
        Some(json!({ "completed": 3, "failed": 1, "total": 4 }))
    );
    assert_eq!(store.status_of(4), status::PENDING);

    cancel_tx.send(true).unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn test_empty_list_completes_with_zero_summary() {
    let store = Arc::new(MemoryStore::default());
    let (queue, cancel_tx, worker) = start_worker(store);

    let handle = queue
        .submit(COMPLETE_ALL_ITEMS, json!({ "todoListId": 42 }))
        .unwrap();

    assert_eq!(wait_terminal(&handle).await, JobState::Completed);
    assert_eq!(handle.progress(), 0);
    assert_eq!(
        handle.result(),
        Some(json!({ "completed": 0, "failed": 0, "total": 0 }))
    );

    let stats = queue.stats();
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.queued + stats.active + stats.failed, 0);

    cancel_tx.send(true).unwrap();
    worker.await.unwrap();
}

#[tokio::test]
async fn test_invalid_payload_fails_job() {
    let store = Arc::new(MemoryStore::default());
    let (queue, cancel_tx, worker) = start_worker(store);

    let handle = queue.submit(COMPLETE_ALL_ITEMS, json!({})).unwrap();

    assert_eq!(wait_terminal(&handle).await, JobState::Failed);
    assert!(handle.result().is_none());

    cancel_tx.send(true).unwrap();
    worker.await.unwrap();
}

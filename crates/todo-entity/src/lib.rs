//! # todo-entity
//!
//! Domain entity models for the todo service. Persistent entities derive
//! `sqlx::FromRow`; everything serializes with camelCase field names to
//! match the HTTP surface.

pub mod item;
pub mod job;
pub mod todo_list;

pub use item::{CreateItem, Item, ItemChanges};
pub use job::{CompleteAllItemsPayload, CompletionSummary, Job, JobState};
pub use todo_list::{CreateTodoList, TodoList};

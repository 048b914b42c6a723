//! # todo-service
//!
//! Business logic service layer. Each service validates input and
//! orchestrates the repositories to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod item;
pub mod todo_list;

pub use item::{CreateItemRequest, ItemService};
pub use todo_list::TodoListService;

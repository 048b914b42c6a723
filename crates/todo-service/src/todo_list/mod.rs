//! Todo list management.

pub mod service;

pub use service::TodoListService;

//! Todo list entities.

pub mod model;

pub use model::{CreateTodoList, TodoList};

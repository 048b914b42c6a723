//! # todo-database
//!
//! PostgreSQL connection management, embedded migrations and the
//! repositories for todo lists and items.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{ItemRepository, TodoListRepository};

//! Route handlers organized by domain.

pub mod health;
pub mod item;
pub mod job;
pub mod todo_list;

//! Item management.

pub mod service;

pub use service::{CreateItemRequest, ItemService};

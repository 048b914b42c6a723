//! Todo item entities.

pub mod model;
pub mod status;

pub use model::{CreateItem, Item, ItemChanges};

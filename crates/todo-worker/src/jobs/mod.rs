//! Built-in job handler implementations.

pub mod complete_all;

pub use complete_all::{CompleteAllItemsHandler, ItemStore, complete_all_items};

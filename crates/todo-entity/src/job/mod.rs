//! Background job domain entities.

pub mod model;
pub mod payload;
pub mod status;
pub mod summary;

pub use model::Job;
pub use payload::{COMPLETE_ALL_ITEMS, CompleteAllItemsPayload, ITEMS_QUEUE};
pub use status::JobState;
pub use summary::CompletionSummary;

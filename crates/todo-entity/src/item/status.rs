//! Well-known item status values.
//!
//! The `status` column is free-form text; these are the values the
//! application itself writes.

/// Status of an item that still needs doing.
pub const PENDING: &str = "Pending";

/// Status written by updates that finish an item.
pub const COMPLETED: &str = "Completed";

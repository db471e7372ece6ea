//! Change log.
//!
//! Change records are written only by [`save_snapshot`] and never updated.
//! Reads come in three shapes: the most recent changes overall, one
//! entity's rank history within a category, and the changes one save
//! produced.
//!
//! [`save_snapshot`]: crate::snapshot::save_snapshot

pub mod query;
pub mod record;

pub use query::{changes_for_snapshot, history_for, recent_changes};

//! Change detector.
//!
//! Compares the rankings of two payloads and reports every entity whose
//! rank moved within a category.
//!
//! ## Entry point
//!
//! ```
//! use rankwatch_core::diff::detect_changes;
//! use serde_json::json;
//!
//! let previous = json!({"groups": [{"groupName": "A", "options": [
//!     {"artistId": "x", "title": "X", "rank": 3}]}]});
//! let current = json!({"groups": [{"groupName": "A", "options": [
//!     {"artistId": "x", "title": "X", "rank": 1}]}]});
//!
//! let changes = detect_changes(&previous, &current);
//! assert_eq!(changes[0].rank_delta, Some(2));
//! ```
//!
//! ## Guarantees
//!
//! - **Pure**: no I/O, identical inputs give identical output.
//! - **Payload order**: output follows the current payload's category
//!   order, then entity order within the category.
//! - **Movement only**: entities that appear or disappear between the
//!   two payloads are not reported.
//! - **Tolerant**: malformed payloads or entries degrade to fewer
//!   results, never to an error.

pub mod engine;
pub mod human_summary;

pub use engine::{detect_changes, detect_set_changes};
pub use human_summary::{render_change_line, render_changes_summary};

//! Rankwatch Core - ranking model and change detection
//!
//! This crate provides the storage-independent half of rankwatch:
//! - Ranking, snapshot and change record models
//! - Tolerant payload parsing into ranking entries
//! - The change detector (rank deltas between two payloads)
//! - Human-readable summaries of detected changes
//! - The error and logging facilities shared by every crate

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod payload;

// Re-export commonly used types
pub use diff::detect_changes;
pub use errors::{ExError, ExErrorKind, Result};
pub use model::{ChangeRecord, RankChange, RankPoint, RankingEntry, RankingSet, Snapshot};

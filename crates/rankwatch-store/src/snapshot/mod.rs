//! Snapshot store.
//!
//! ## Responsibilities
//!
//! - Append each fetched payload as an immutable snapshot row
//! - Diff the new payload against its immediate predecessor and append the
//!   resulting change records, in the same transaction
//! - Read snapshots back (latest, by id, listings)
//!
//! ## Non-Responsibilities
//!
//! - Fetching payloads (handled by `rankwatch-engine`)
//! - Rank diffing itself (handled by `rankwatch-core::diff`)

pub mod persist;
pub mod query;

// Re-export primary types
pub use persist::{save_snapshot, SaveResult};
pub use query::{fetch_snapshot, latest_snapshot, list_snapshots, snapshot_count};

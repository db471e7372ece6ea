//! Rankwatch Store - SQLite persistence for snapshots and rank changes
//!
//! Provides:
//! - Connection setup and embedded, checksummed migrations
//! - The snapshot store (append-only raw payloads, save with change detection)
//! - The change log (recent changes, per-entity rank history)
//! - [`RankStore`], a facade owning one connection

pub mod changelog;
pub mod db;
pub mod errors;
pub mod migrations;
pub mod snapshot;
pub mod store;

// Re-export key types
pub use errors::Result;
pub use snapshot::SaveResult;
pub use store::RankStore;

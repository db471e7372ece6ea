//! Domain models for rankwatch
//!
//! - [`RankingEntry`] / [`RankingSet`]: the parsed view of one payload
//! - [`Snapshot`]: one immutable stored payload
//! - [`RankChange`] / [`ChangeRecord`] / [`RankPoint`]: detected rank movement

pub mod change;
pub mod ranking;
pub mod snapshot;

pub use change::{ChangeDirection, ChangeRecord, RankChange, RankPoint};
pub use ranking::{CategoryRanking, RankingEntry, RankingSet};
pub use snapshot::{Snapshot, SnapshotMeta};

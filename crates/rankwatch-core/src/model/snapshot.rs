//! Stored snapshot of one fetched payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One immutable payload as persisted by the snapshot store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Monotonic id assigned by the store
    pub id: i64,
    /// The raw payload exactly as fetched
    pub payload: Value,
    /// Update time reported by the upstream API (`updatedAt`)
    pub updated_at: Option<String>,
    /// Local fetch time (`fetchedAt`)
    pub fetched_at: String,
    /// Store commit time, milliseconds since epoch
    pub created_at: i64,
}

/// Snapshot metadata without the payload, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub id: i64,
    pub updated_at: Option<String>,
    pub fetched_at: String,
    pub created_at: i64,
    /// Number of change records produced when this snapshot was saved
    pub change_count: i64,
}

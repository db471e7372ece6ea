//! Rank change types.
//!
//! [`RankChange`] is what the detector produces; [`ChangeRecord`] is the
//! same fact once the store has tied it to a snapshot pair and a
//! detection time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a rank movement. Lower rank numbers are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Up,
    Down,
    New,
}

fn rank_delta(old_rank: Option<u32>, new_rank: u32) -> Option<i64> {
    old_rank.map(|old| i64::from(old) - i64::from(new_rank))
}

fn direction(rank_delta: Option<i64>) -> ChangeDirection {
    match rank_delta {
        Some(d) if d > 0 => ChangeDirection::Up,
        Some(_) => ChangeDirection::Down,
        None => ChangeDirection::New,
    }
}

/// A detected rank movement, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankChange {
    pub category: String,
    pub entity_id: String,
    pub entity_name: String,
    pub old_rank: Option<u32>,
    pub new_rank: u32,
    /// `old_rank - new_rank`; positive means the entity moved up
    pub rank_delta: Option<i64>,
}

impl RankChange {
    /// Build a change, deriving `rank_delta` from the two ranks.
    pub fn new(
        category: impl Into<String>,
        entity_id: impl Into<String>,
        entity_name: impl Into<String>,
        old_rank: Option<u32>,
        new_rank: u32,
    ) -> Self {
        Self {
            category: category.into(),
            entity_id: entity_id.into(),
            entity_name: entity_name.into(),
            old_rank,
            new_rank,
            rank_delta: rank_delta(old_rank, new_rank),
        }
    }

    pub fn direction(&self) -> ChangeDirection {
        direction(self.rank_delta)
    }
}

/// A persisted change, owned by the snapshot whose save produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: i64,
    pub snapshot_id: i64,
    /// The predecessor the snapshot was diffed against
    pub previous_snapshot_id: Option<i64>,
    pub category: String,
    pub entity_id: String,
    pub entity_name: String,
    pub old_rank: Option<u32>,
    pub new_rank: u32,
    pub rank_delta: Option<i64>,
    pub detected_at: DateTime<Utc>,
}

impl ChangeRecord {
    pub fn direction(&self) -> ChangeDirection {
        direction(self.rank_delta)
    }
}

/// One point of an entity's rank history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankPoint {
    pub rank: u32,
    pub detected_at: DateTime<Utc>,
}

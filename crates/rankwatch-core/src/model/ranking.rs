//! Ranking entries extracted from a payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ranked entity inside one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub category: String,
    pub entity_id: String,
    pub display_name: String,
    /// 1 = best. Never zero.
    pub rank: u32,
}

/// All entries of one category, in payload order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRanking {
    pub name: String,
    pub group_id: Option<String>,
    pub entries: Vec<RankingEntry>,
}

/// Every category of one payload, in payload order.
///
/// Built by [`crate::payload::extract_rankings`]. Within a set the pair
/// (category, entity_id) is unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSet {
    pub categories: Vec<CategoryRanking>,
    /// Entries or groups dropped because they were malformed
    pub skipped: usize,
}

impl RankingSet {
    /// True when no entry survived parsing
    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.entries.is_empty())
    }

    /// Iterate entries category by category, preserving payload order.
    pub fn entries(&self) -> impl Iterator<Item = &RankingEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    /// Total number of entries across all categories
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Lookup of (category, entity_id) → rank.
    pub fn rank_lookup(&self) -> HashMap<(&str, &str), u32> {
        self.entries()
            .map(|e| ((e.category.as_str(), e.entity_id.as_str()), e.rank))
            .collect()
    }
}

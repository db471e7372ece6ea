//! Rank diff computation.

use crate::model::{RankChange, RankingSet};
use crate::payload::extract_rankings;
use serde_json::Value;

/// Diff two already-parsed ranking sets.
///
/// For every entry of `current` whose (category, entity_id) also exists in
/// `previous` with a different rank, one [`RankChange`] is emitted.
pub fn detect_set_changes(previous: &RankingSet, current: &RankingSet) -> Vec<RankChange> {
    let old_ranks = previous.rank_lookup();

    current
        .entries()
        .filter_map(|entry| {
            let old_rank = *old_ranks.get(&(entry.category.as_str(), entry.entity_id.as_str()))?;
            if old_rank == entry.rank {
                return None;
            }
            Some(RankChange::new(
                entry.category.clone(),
                entry.entity_id.clone(),
                entry.display_name.clone(),
                Some(old_rank),
                entry.rank,
            ))
        })
        .collect()
}

/// Diff two raw payloads.
///
/// Both payloads are parsed tolerantly; see [`extract_rankings`].
pub fn detect_changes(previous: &Value, current: &Value) -> Vec<RankChange> {
    let previous = extract_rankings(previous);
    let current = extract_rankings(current);
    let changes = detect_set_changes(&previous, &current);

    tracing::debug!(
        previous_entries = previous.len(),
        current_entries = current.len(),
        change_count = changes.len(),
        "Detected rank changes"
    );

    changes
}

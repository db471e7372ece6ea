//! Tolerant extraction of ranking entries.
//!
//! Missing structure never fails the caller: a payload without `groups`
//! yields an empty set, a malformed group or option is skipped and
//! counted in [`RankingSet::skipped`].

use super::{
    KEY_ARTIST_ID, KEY_FETCHED_AT, KEY_GROUPS, KEY_GROUP_ID, KEY_GROUP_NAME, KEY_OPTIONS, KEY_RANK,
    KEY_TITLE, KEY_UPDATED_AT,
};
use crate::model::{CategoryRanking, RankingEntry, RankingSet};
use serde_json::Value;
use std::collections::HashSet;

/// Read an identifier that the API sends either as a string or a number.
pub(crate) fn id_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A rank must be a positive integer that fits in `u32`.
pub(crate) fn rank_value(value: Option<&Value>) -> Option<u32> {
    let rank = value?.as_u64()?;
    if rank == 0 {
        return None;
    }
    u32::try_from(rank).ok()
}

fn parse_entry(category: &str, option: &Value) -> Option<RankingEntry> {
    let entity_id = id_value(option.get(KEY_ARTIST_ID))?;
    let rank = rank_value(option.get(KEY_RANK))?;
    let display_name = option
        .get(KEY_TITLE)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| entity_id.clone());

    Some(RankingEntry {
        category: category.to_string(),
        entity_id,
        display_name,
        rank,
    })
}

/// Extract every well-formed ranking entry from a payload.
///
/// Categories and entries keep payload order. When the same
/// (category, entity_id) appears twice the first occurrence wins.
pub fn extract_rankings(payload: &Value) -> RankingSet {
    let mut set = RankingSet::default();

    let Some(groups) = payload.get(KEY_GROUPS).and_then(Value::as_array) else {
        return set;
    };

    let mut seen: HashSet<(String, String)> = HashSet::new();

    for group in groups {
        let Some(name) = group.get(KEY_GROUP_NAME).and_then(Value::as_str) else {
            set.skipped += 1;
            continue;
        };
        let Some(options) = group.get(KEY_OPTIONS).and_then(Value::as_array) else {
            set.skipped += 1;
            continue;
        };

        let mut entries = Vec::with_capacity(options.len());
        for option in options {
            let Some(entry) = parse_entry(name, option) else {
                set.skipped += 1;
                continue;
            };
            if !seen.insert((name.to_string(), entry.entity_id.clone())) {
                set.skipped += 1;
                continue;
            }
            entries.push(entry);
        }

        set.categories.push(CategoryRanking {
            name: name.to_string(),
            group_id: id_value(group.get(KEY_GROUP_ID)),
            entries,
        });
    }

    if set.skipped > 0 {
        tracing::debug!(
            skipped_entries = set.skipped,
            categories = set.categories.len(),
            "Skipped malformed ranking entries"
        );
    }

    set
}

/// Upstream `updatedAt`, if present as a string.
pub fn updated_at(payload: &Value) -> Option<String> {
    payload
        .get(KEY_UPDATED_AT)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Local `fetchedAt`, if present as a string.
pub fn fetched_at(payload: &Value) -> Option<String> {
    payload
        .get(KEY_FETCHED_AT)
        .and_then(Value::as_str)
        .map(str::to_string)
}

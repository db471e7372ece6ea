//! Simplified ranking view for presentation.
//!
//! The summary is what `GET /api/rankings` and `rankwatch-cli rankings`
//! print: categories keyed by name, entries sorted best-first.

use super::parse::{id_value, rank_value};
use super::{
    fetched_at, updated_at, KEY_ARTIST_ID, KEY_GROUPS, KEY_GROUP_ID, KEY_GROUP_NAME, KEY_OPTIONS,
    KEY_OPTION_ID, KEY_RANK, KEY_TITLE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub rank: u32,
    pub title: String,
    pub artist_id: String,
    pub option_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub group_id: Option<String>,
    /// Sorted by rank ascending
    pub entries: Vec<SummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub updated_at: Option<String>,
    pub fetched_at: Option<String>,
    pub categories: BTreeMap<String, CategorySummary>,
}

fn summary_entry(option: &Value) -> Option<SummaryEntry> {
    let artist_id = id_value(option.get(KEY_ARTIST_ID))?;
    let rank = rank_value(option.get(KEY_RANK))?;
    Some(SummaryEntry {
        rank,
        title: option
            .get(KEY_TITLE)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| artist_id.clone()),
        artist_id,
        option_id: id_value(option.get(KEY_OPTION_ID)),
    })
}

/// Summarize a payload, or `None` when it has no `groups` array.
///
/// Malformed groups and options are left out, the same way
/// [`extract_rankings`](super::extract_rankings) drops them.
pub fn summarize(payload: &Value) -> Option<RankingSummary> {
    let groups = payload.get(KEY_GROUPS)?.as_array()?;

    let mut categories = BTreeMap::new();
    for group in groups {
        let Some(name) = group.get(KEY_GROUP_NAME).and_then(Value::as_str) else {
            continue;
        };
        let mut entries: Vec<SummaryEntry> = group
            .get(KEY_OPTIONS)
            .and_then(Value::as_array)
            .map(|options| options.iter().filter_map(summary_entry).collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.rank);

        categories.insert(
            name.to_string(),
            CategorySummary {
                group_id: id_value(group.get(KEY_GROUP_ID)),
                entries,
            },
        );
    }

    Some(RankingSummary {
        updated_at: updated_at(payload),
        fetched_at: fetched_at(payload),
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize_sorts_entries_by_rank() {
        let payload = json!({
            "updatedAt": "2025-11-02T10:00:00Z",
            "fetchedAt": "2025-11-02T10:00:03Z",
            "groups": [{
                "groupId": "g1",
                "groupName": "Song of the Year",
                "options": [
                    {"artistId": "b", "title": "B", "rank": 2, "optionId": "o2"},
                    {"artistId": "a", "title": "A", "rank": 1, "optionId": "o1"},
                    {"artistId": "c", "title": "C", "rank": 3}
                ]
            }]
        });

        let summary = summarize(&payload).unwrap();
        assert_eq!(summary.updated_at.as_deref(), Some("2025-11-02T10:00:00Z"));
        let song = &summary.categories["Song of the Year"];
        assert_eq!(song.group_id.as_deref(), Some("g1"));
        let ids: Vec<&str> = song.entries.iter().map(|e| e.artist_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(song.entries[2].option_id, None);
    }

    #[test]
    fn test_summarize_without_groups_is_none() {
        assert!(summarize(&json!({"updatedAt": "x"})).is_none());
        assert!(summarize(&json!({"groups": "nope"})).is_none());
    }
}

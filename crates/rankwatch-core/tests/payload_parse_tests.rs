//! Tolerant payload parsing into ranking entries.

use rankwatch_core::payload::{extract_rankings, summarize};
use serde_json::json;

#[test]
fn test_extract_preserves_category_and_entry_order() {
    let payload = json!({"groups": [
        {"groupName": "Zeta", "groupId": 9, "options": [
            {"artistId": "b", "title": "B", "rank": 2},
            {"artistId": "a", "title": "A", "rank": 1}
        ]},
        {"groupName": "Alpha", "options": [
            {"artistId": "c", "title": "C", "rank": 1}
        ]}
    ]});

    let set = extract_rankings(&payload);

    let names: Vec<&str> = set.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
    assert_eq!(set.categories[0].group_id.as_deref(), Some("9"));
    let ids: Vec<&str> = set.entries().map(|e| e.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.skipped, 0);
}

#[test]
fn test_extract_skips_malformed_groups() {
    let payload = json!({"groups": [
        "not a group",
        {"options": [{"artistId": "a", "rank": 1}]},
        {"groupName": "NoOptions"},
        {"groupName": "Ok", "options": [{"artistId": "a", "title": "A", "rank": 1}]}
    ]});

    let set = extract_rankings(&payload);

    assert_eq!(set.categories.len(), 1);
    assert_eq!(set.categories[0].name, "Ok");
    assert_eq!(set.skipped, 3);
}

#[test]
fn test_extract_keeps_first_duplicate() {
    let payload = json!({"groups": [{"groupName": "A", "options": [
        {"artistId": "x", "title": "X", "rank": 1},
        {"artistId": "x", "title": "X again", "rank": 7}
    ]}]});

    let set = extract_rankings(&payload);

    assert_eq!(set.len(), 1);
    assert_eq!(set.categories[0].entries[0].rank, 1);
    assert_eq!(set.skipped, 1);
}

#[test]
fn test_extract_defaults_display_name_to_entity_id() {
    let payload = json!({"groups": [{"groupName": "A", "options": [
        {"artistId": "x", "rank": 1}
    ]}]});

    let set = extract_rankings(&payload);

    assert_eq!(set.categories[0].entries[0].display_name, "x");
}

#[test]
fn test_extract_from_non_object_is_empty() {
    for payload in [json!(null), json!(42), json!("groups"), json!({"groups": {}})] {
        let set = extract_rankings(&payload);
        assert!(set.is_empty());
        assert_eq!(set.skipped, 0);
    }
}

#[test]
fn test_summary_keys_categories_by_name() {
    let payload = json!({"fetchedAt": "2025-11-02T10:00:03Z", "groups": [
        {"groupName": "B", "options": [{"artistId": "x", "title": "X", "rank": 1}]},
        {"groupName": "A", "options": []}
    ]});

    let summary = summarize(&payload).unwrap();

    assert_eq!(summary.fetched_at.as_deref(), Some("2025-11-02T10:00:03Z"));
    assert_eq!(summary.updated_at, None);
    let keys: Vec<&str> = summary.categories.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert!(summary.categories["A"].entries.is_empty());
}

//! Synthetic payload builders shared by the store tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// A payload with one category per `(category, [(entity_id, rank)])`.
pub fn payload(categories: &[(&str, &[(&str, u32)])]) -> Value {
    let groups: Vec<Value> = categories
        .iter()
        .map(|(name, entries)| {
            let options: Vec<Value> = entries
                .iter()
                .map(|(id, rank)| {
                    json!({
                        "artistId": id,
                        "optionId": format!("opt-{}", id),
                        "title": format!("Artist {}", id),
                        "rank": rank
                    })
                })
                .collect();
            json!({"groupId": format!("g-{}", name), "groupName": name, "options": options})
        })
        .collect();

    json!({
        "updatedAt": "2025-11-02T10:00:00Z",
        "fetchedAt": "2025-11-02T10:00:03.120Z",
        "groups": groups
    })
}

/// Shorthand for a single-category payload.
pub fn single(category: &str, entries: &[(&str, u32)]) -> Value {
    payload(&[(category, entries)])
}

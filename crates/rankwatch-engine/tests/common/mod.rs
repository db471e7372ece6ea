//! Stub fetchers and payload builders for engine tests.

#![allow(dead_code)]

use rankwatch_engine::{FetchError, Fetcher};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a scripted sequence of fetch outcomes; fails with `Transport` once exhausted.
pub struct ScriptedFetcher {
    outcomes: Mutex<VecDeque<Result<Value, FetchError>>>,
}

impl ScriptedFetcher {
    pub fn new(outcomes: Vec<Result<Value, FetchError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.lock().unwrap().len()
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&self) -> Result<Value, FetchError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unavailable()))
    }
}

pub fn unavailable() -> FetchError {
    FetchError::Status {
        url: "https://rankings.test/api".into(),
        status: 503,
    }
}

/// One-category payload with `(entity_id, rank)` entries.
pub fn ranking(entries: &[(&str, u32)]) -> Value {
    let options: Vec<Value> = entries
        .iter()
        .map(|(id, rank)| json!({"artistId": id, "title": format!("Artist {}", id), "rank": rank}))
        .collect();
    json!({
        "updatedAt": "2025-11-02T10:00:00Z",
        "fetchedAt": "2025-11-02T10:00:03.120Z",
        "groups": [{"groupId": "g1", "groupName": "Song of the Year", "options": options}]
    })
}

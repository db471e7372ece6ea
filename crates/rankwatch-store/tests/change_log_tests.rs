// Change log queries: recency ordering, limits and per-entity history.

mod common;

use common::{payload, single};
use rankwatch_store::RankStore;

fn store_with_history() -> RankStore {
    let mut store = RankStore::open_in_memory().unwrap();
    // x: 5 → 3 → 3 → 1 ; y: 1 → 2 → 4 → 4
    for entries in [
        &[("x", 5), ("y", 1)][..],
        &[("x", 3), ("y", 2)][..],
        &[("x", 3), ("y", 4)][..],
        &[("x", 1), ("y", 4)][..],
    ] {
        store.save(&single("Song", entries)).unwrap();
    }
    store
}

#[test]
fn test_recent_limit_one_is_latest_record() {
    let store = store_with_history();

    let recent = store.recent(1).unwrap();

    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].snapshot_id, 4);
    assert_eq!(recent[0].entity_id, "x");
    assert_eq!(recent[0].new_rank, 1);
}

#[test]
fn test_recent_is_newest_first() {
    let store = store_with_history();

    let recent = store.recent(50).unwrap();

    let snapshots: Vec<i64> = recent.iter().map(|c| c.snapshot_id).collect();
    assert_eq!(snapshots, vec![4, 3, 2, 2]);
    assert!(recent
        .windows(2)
        .all(|w| w[0].detected_at >= w[1].detected_at));
}

#[test]
fn test_recent_limit_beyond_log_returns_everything() {
    let store = store_with_history();

    assert_eq!(store.recent(1_000).unwrap().len(), 4);
    assert_eq!(store.recent(usize::MAX).unwrap().len(), 4);
    assert!(store.recent(0).unwrap().is_empty());
}

#[test]
fn test_history_for_is_strictly_increasing() {
    let store = store_with_history();

    let history = store.history_for("x", "Song").unwrap();

    let ranks: Vec<u32> = history.iter().map(|p| p.rank).collect();
    assert_eq!(ranks, vec![3, 1]);
    assert!(history
        .windows(2)
        .all(|w| w[0].detected_at < w[1].detected_at));
}

#[test]
fn test_history_for_rapid_saves_never_ties() {
    let mut store = RankStore::open_in_memory().unwrap();
    for rank in [10, 9, 8, 7, 6, 5, 4, 3, 2, 1] {
        store.save(&single("Song", &[("x", rank)])).unwrap();
    }

    let history = store.history_for("x", "Song").unwrap();

    assert_eq!(history.len(), 9);
    assert!(history
        .windows(2)
        .all(|w| w[0].detected_at < w[1].detected_at));
    assert_eq!(history.last().map(|p| p.rank), Some(1));
}

#[test]
fn test_history_for_is_scoped_to_category() {
    let mut store = RankStore::open_in_memory().unwrap();
    store
        .save(&payload(&[("Song", &[("x", 2)]), ("Album", &[("x", 5)])]))
        .unwrap();
    store
        .save(&payload(&[("Song", &[("x", 1)]), ("Album", &[("x", 5)])]))
        .unwrap();

    assert_eq!(store.history_for("x", "Song").unwrap().len(), 1);
    assert!(store.history_for("x", "Album").unwrap().is_empty());
    assert!(store.history_for("nobody", "Song").unwrap().is_empty());
}

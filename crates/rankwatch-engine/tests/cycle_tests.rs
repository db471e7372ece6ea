// Fetch-and-save cycle: reports, failure isolation and logging boundaries.

mod common;

use common::{ranking, unavailable, ScriptedFetcher};
use rankwatch_core::errors::ExErrorKind;
use rankwatch_core::logging_facility::test_capture::init_test_capture;
use rankwatch_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_CYCLE_ID, FIELD_DURATION_MS, FIELD_ERR_CODE,
};
use rankwatch_engine::{run_cycle, FetchError, FileFetcher};
use rankwatch_store::RankStore;
use std::time::Duration;

#[test]
fn test_cycle_reports_saved_snapshot_and_changes() {
    let mut store = RankStore::open_in_memory().unwrap();
    let fetcher = ScriptedFetcher::new(vec![
        Ok(ranking(&[("x", 3), ("y", 1)])),
        Ok(ranking(&[("x", 1), ("y", 3)])),
    ]);

    let first = run_cycle(&mut store, &fetcher).unwrap();
    assert_eq!(first.snapshot_id, 1);
    assert_eq!(first.previous_snapshot_id, None);
    assert!(first.changes.is_empty());
    assert_eq!(first.updated_at.as_deref(), Some("2025-11-02T10:00:00Z"));

    let second = run_cycle(&mut store, &fetcher).unwrap();
    assert_eq!(second.snapshot_id, 2);
    assert_eq!(second.previous_snapshot_id, Some(1));
    let moves: Vec<(&str, Option<i64>)> = second
        .changes
        .iter()
        .map(|c| (c.entity_id.as_str(), c.rank_delta))
        .collect();
    assert_eq!(moves, vec![("x", Some(2)), ("y", Some(-2))]);
    assert_ne!(first.cycle_id, second.cycle_id);
}

#[test]
fn test_failed_fetch_never_touches_store() {
    let mut store = RankStore::open_in_memory().unwrap();
    let fetcher = ScriptedFetcher::new(vec![Err(unavailable())]);

    let err = run_cycle(&mut store, &fetcher).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(store.snapshot_count().unwrap(), 0);
}

#[test]
fn test_timeout_maps_to_timeout_kind() {
    let mut store = RankStore::open_in_memory().unwrap();
    let fetcher = ScriptedFetcher::new(vec![Err(FetchError::Timeout {
        url: "https://rankings.test/api".into(),
        timeout: Duration::from_secs(10),
    })]);

    let err = run_cycle(&mut store, &fetcher).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Timeout);
}

#[test]
fn test_import_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("payload.json");
    std::fs::write(&path, ranking(&[("x", 2)]).to_string()).unwrap();
    let mut store = RankStore::initialize(dir.path().join("rankings.db")).unwrap();

    let report = run_cycle(&mut store, &FileFetcher::new(&path)).unwrap();

    assert_eq!(report.snapshot_id, 1);
    let latest = store.latest().unwrap().unwrap();
    assert_eq!(latest.fetched_at, "2025-11-02T10:00:03.120Z");
}

#[test]
fn test_cycle_logs_start_and_end() {
    let capture = init_test_capture();
    let mut store = RankStore::open_in_memory().unwrap();
    let fetcher = ScriptedFetcher::new(vec![Ok(ranking(&[("x", 1)])), Err(unavailable())]);

    let report = run_cycle(&mut store, &fetcher).unwrap();
    let cycle_id = report.cycle_id.to_string();

    let starts = capture.find_events("run_cycle", EVENT_START);
    assert!(starts
        .iter()
        .any(|e| e.field(FIELD_CYCLE_ID) == Some(cycle_id.as_str())));
    let ends = capture.find_events("run_cycle", EVENT_END);
    assert!(ends
        .iter()
        .any(|e| e.field(FIELD_CYCLE_ID) == Some(cycle_id.as_str())
            && e.field(FIELD_DURATION_MS).is_some()));

    let err = run_cycle(&mut store, &fetcher).unwrap_err();
    let errors = capture.find_events("run_cycle", EVENT_END_ERROR);
    assert!(errors
        .iter()
        .any(|e| e.field(FIELD_ERR_CODE) == Some(err.code())));
}

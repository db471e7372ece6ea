#![allow(clippy::unwrap_used, clippy::expect_used)]

use rankwatch_core::errors::{ExError, ExErrorKind};
use rankwatch_core::logging_facility::test_capture::init_test_capture;
use rankwatch_core::{log_op_end, log_op_error, log_op_start};
use rankwatch_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name, snapshot_id = 4);

    let start_events = capture.find_events(op_name, EVENT_START);
    assert_eq!(start_events.len(), 1);
    assert_eq!(start_events[0].field("snapshot_id"), Some("4"));
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.find_events(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_kind_and_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::Persistence).with_message("disk full");
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.find_events(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1);
    let event = &error_events[0];
    assert_eq!(event.level, tracing::Level::ERROR);
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_PERSISTENCE"));
    assert_eq!(event.field(FIELD_ERR_KIND), Some("Persistence"));
    assert_eq!(event.field("err_message"), Some("disk full"));
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_4";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
    let events = capture.find_events(op_name, EVENT_START);
    assert_eq!(
        events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}

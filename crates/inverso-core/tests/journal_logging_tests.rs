#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{field, p, set, store_with_prims};
use inverso_core::errors::{ExError, ExErrorKind, InversoError};
use inverso_core::logging_facility::test_capture::init_test_capture;
use inverso_core::{log_op_end, log_op_error, log_op_start};
use inverso_core::{EditLog, EditRecorder, SpecType, TransactionBlock, Value};
use inverso_core_types::schema::{
    EVENT_CODING_ERROR, EVENT_END, EVENT_END_ERROR, EVENT_PERF_WARNING, EVENT_START,
};

#[test]
fn test_muted_edits_mutate_store_but_are_not_recorded() {
    let capture = init_test_capture();
    let store = store_with_prims(&["/A"]);
    let store_id = store.borrow().id().to_string();

    // GIVEN an open transaction
    let block = TransactionBlock::new();
    set(&store, "/A", "recorded", Value::Int(1));

    // WHEN an edit is made while muted
    {
        let _muted = EditRecorder::muted();
        set(&store, "/A", "hidden", Value::Int(2));
    }
    let handle = block.close().unwrap();

    // THEN the store changed but the log only restores the recorded field
    assert_eq!(field(&store, "/A", "hidden"), Some(Value::Int(2)));
    assert!(handle.invert());
    assert_eq!(field(&store, "/A", "recorded"), None);
    assert_eq!(field(&store, "/A", "hidden"), Some(Value::Int(2)));

    // AND the dropped edit was reported as a performance warning
    let warnings: Vec<_> = capture
        .events_for_store(&store_id)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_PERF_WARNING))
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("hook"), Some("set_field"));
    assert_eq!(
        warnings[0].field("err.code"),
        Some(ExErrorKind::PerformanceWarning.code())
    );
}

#[test]
fn test_expired_store_ops_fail_with_warning() {
    let capture = init_test_capture();
    let store = store_with_prims(&["/A"]);
    let store_id = store.borrow().id().to_string();

    let block = TransactionBlock::new();
    set(&store, "/A", "x", Value::Int(1));
    store.borrow_mut().create_spec(&p("/A/B"), SpecType::Prim).unwrap();
    let handle = block.close().unwrap();

    // WHEN the store is dropped before the log is inverted
    drop(store);

    // THEN every op fails and the log swaps to empty
    assert!(!handle.invert());
    assert!(handle.is_empty());

    let expired = capture.count_events(|e| {
        e.is_for_store(&store_id) && e.field("err.code") == Some(ExErrorKind::ExpiredTarget.code())
    });
    assert_eq!(expired, 2);
}

#[test]
fn test_invert_inside_transaction_is_coding_error() {
    let capture = init_test_capture();
    let store = store_with_prims(&["/A"]);

    // GIVEN a finalized log with four ops
    let block = TransactionBlock::new();
    for name in ["/A/B1", "/A/B2", "/A/B3", "/A/B4"] {
        store.borrow_mut().create_spec(&p(name), SpecType::Prim).unwrap();
    }
    let handle = block.close().unwrap();
    assert_eq!(handle.len(), 4);

    // WHEN it is inverted while another transaction is open
    let open = TransactionBlock::new();
    assert!(!handle.invert());
    drop(open);

    // THEN nothing changed and a coding error was logged
    assert_eq!(handle.len(), 4);
    assert!(store.borrow().has_spec(&p("/A/B4")));
    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("invert")
            && e.event.as_deref() == Some(EVENT_CODING_ERROR)
            && e.field("log_len") == Some("4")
    });
    assert_eq!(errors, 1);
    assert!(capture
        .events()
        .iter()
        .any(|e| e.field("err.code") == Some(ExErrorKind::ProgrammingError.code())));
}

#[test]
fn test_unbalanced_exit_is_coding_error() {
    let capture = init_test_capture();
    assert!(EditRecorder::exit().is_none());
    capture.assert_event_exists("exit", EVENT_CODING_ERROR);
}

#[test]
fn test_invert_logs_start_and_end() {
    let capture = init_test_capture();
    let mut log = EditLog::new();
    assert!(log.invert());
    capture.assert_event_exists("invert", EVENT_START);
    capture.assert_event_exists("invert", EVENT_END);
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "journal_log_op_error_unique_1";

    let err = InversoError::SpecNotFound {
        path: "/Missing".to_string(),
    };
    log_op_error!(op_name, err.clone(), duration_ms = 3);

    let events = capture.events();
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("Should have error event");
    assert_eq!(error_event.field("err.code"), Some("ERR_NOT_FOUND"));

    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_start_end_pair_with_fields() {
    let capture = init_test_capture();
    let op_name = "journal_start_end_unique_2";

    log_op_start!(op_name, log_len = 3);
    log_op_end!(op_name, duration_ms = 42);

    let start = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .expect("Should have start event");
    assert_eq!(start.field("log_len"), Some("3"));
    assert_eq!(
        capture.count_events(|e| e.op.as_deref() == Some(op_name)),
        2
    );
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_assert_event_exists_fails_for_unknown_op() {
    let capture = init_test_capture();
    capture.assert_event_exists("journal_nonexistent_op_unique_3", EVENT_START);
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{store_with_a, value_of};
use inverso_core::logging_facility::test_capture::init_test_capture;
use inverso_core::{Token, TransactionBlock, Value};
use inverso_core_types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use inverso_engine::{CommandArgs, CommandRegistry, CommandStatus, UndoStack};

#[test]
fn test_execute_undo_inverse_through_registry() {
    let capture = init_test_capture();
    let store = store_with_a();

    // GIVEN a finalized log setting /A.x
    let block = TransactionBlock::new();
    store
        .borrow_mut()
        .set_field(&common::p("/A"), &Token::from("x"), Value::Int(3))
        .unwrap();
    let handle = block.close().unwrap();

    // WHEN undo_inverse is executed with it
    let registry = CommandRegistry::with_defaults();
    let (command, result) = registry
        .execute("undo_inverse", &CommandArgs::new().arg(handle))
        .unwrap();

    // THEN the edit is undone and the command can replay it
    assert!(result.is_success());
    assert_eq!(value_of(&store, "x"), None);

    let mut stack = UndoStack::new(0);
    stack.push(command, false);
    assert!(stack.undo());
    assert_eq!(value_of(&store, "x"), Some(Value::Int(3)));

    capture.assert_event_exists("execute_command", EVENT_START);
    capture.assert_event_exists("execute_command", EVENT_END);
    capture.assert_event_exists("stack_undo", EVENT_END);
}

#[test]
fn test_unknown_command_logs_error() {
    let capture = init_test_capture();
    let registry = CommandRegistry::with_defaults();

    assert!(registry.execute("not_registered", &CommandArgs::new()).is_err());

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("execute_command")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field("err.code") == Some("ERR_UNKNOWN_COMMAND")
    });
    assert!(errors >= 1);
}

#[test]
fn test_missing_argument_is_invalid_arg() {
    let registry = CommandRegistry::with_defaults();
    let (_, result) = registry
        .execute("undo_inverse", &CommandArgs::new().arg("not a log"))
        .unwrap();
    assert_eq!(result.status, CommandStatus::InvalidArg);
    assert!(result.message.is_some());
}

//! The command that wraps one finalized edit log
//!
//! Undo and redo are the same call: each inversion swaps the log into the
//! inverse of what it just replayed.

use super::command::{Command, CommandArgs, CommandResult, UndoableCommand};
use inverso_core::{log_op_end, log_op_start, EditLogHandle};
use std::time::Instant;

pub const UNDO_INVERSE_COMMAND: &str = "undo_inverse";

#[derive(Debug, Default)]
pub struct UndoInverseCommand {
    log: Option<EditLogHandle>,
}

impl UndoInverseCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a log that has already been applied, ready for `undo()`
    pub fn from_handle(handle: EditLogHandle) -> Self {
        Self { log: Some(handle) }
    }

    pub fn log(&self) -> Option<&EditLogHandle> {
        self.log.as_ref()
    }

    fn invert(&self, op: &'static str) -> bool {
        let Some(log) = &self.log else {
            tracing::warn!(
                component = module_path!(),
                op = op,
                "{} has no edit log to invert",
                UNDO_INVERSE_COMMAND
            );
            return false;
        };

        let start = Instant::now();
        log_op_start!(op, log_len = log.len());
        let ok = log.invert();
        if !ok {
            tracing::warn!(
                component = module_path!(),
                op = op,
                "{} failed to fully invert its edit log",
                UNDO_INVERSE_COMMAND
            );
        }
        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            success = ok
        );
        ok
    }
}

impl Command for UndoInverseCommand {
    fn name(&self) -> &str {
        UNDO_INVERSE_COMMAND
    }

    fn execute(&mut self, args: &CommandArgs) -> CommandResult {
        let Some(handle) = args.edit_log(0) else {
            return CommandResult::invalid_arg(format!(
                "{} expects an edit log as its first argument",
                UNDO_INVERSE_COMMAND
            ));
        };
        self.log = Some(handle.clone());
        if self.invert("execute") {
            CommandResult::success()
        } else {
            CommandResult::failed("edit log inversion failed")
        }
    }
}

impl UndoableCommand for UndoInverseCommand {
    fn undo(&mut self) -> bool {
        self.invert("undo")
    }

    fn redo(&mut self) -> bool {
        self.invert("redo")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command::CommandStatus;
    use inverso_core::{open_store, DocumentPath, SpecType, Token, TransactionBlock, Value};

    fn recorded_set() -> (inverso_core::StoreHandle, EditLogHandle) {
        let store = open_store();
        let path = DocumentPath::parse("/A").unwrap();
        store.borrow_mut().create_spec(&path, SpecType::Prim).unwrap();

        let block = TransactionBlock::new();
        store
            .borrow_mut()
            .set_field(&path, &Token::from("x"), Value::Int(1))
            .unwrap();
        let handle = block.close().unwrap();
        (store, handle)
    }

    fn x(store: &inverso_core::StoreHandle) -> Option<Value> {
        store
            .borrow()
            .get_field(&DocumentPath::parse("/A").unwrap(), &Token::from("x"))
            .cloned()
    }

    #[test]
    fn test_execute_requires_edit_log_argument() {
        let mut cmd = UndoInverseCommand::new();
        let result = cmd.execute(&CommandArgs::new().arg(1i64));
        assert_eq!(result.status, CommandStatus::InvalidArg);
        assert!(cmd.log().is_none());
    }

    #[test]
    fn test_execute_inverts_and_keeps_handle() {
        let (store, handle) = recorded_set();
        let mut cmd = UndoInverseCommand::new();

        let result = cmd.execute(&CommandArgs::new().arg(handle.clone()));

        assert!(result.is_success());
        assert_eq!(x(&store), None);
        assert!(cmd.log().is_some_and(|log| log.ptr_eq(&handle)));
    }

    #[test]
    fn test_undo_redo_ping_pong() {
        let (store, handle) = recorded_set();
        let mut cmd = UndoInverseCommand::from_handle(handle);

        assert!(cmd.undo());
        assert_eq!(x(&store), None);
        assert!(cmd.redo());
        assert_eq!(x(&store), Some(Value::Int(1)));
        assert!(cmd.undo());
        assert_eq!(x(&store), None);
    }

    #[test]
    fn test_undo_without_log_fails() {
        let mut cmd = UndoInverseCommand::new();
        assert!(!cmd.undo());
        assert!(!cmd.redo());
    }

    #[test]
    fn test_expired_store_reports_failure() {
        let (store, handle) = recorded_set();
        drop(store);
        let mut cmd = UndoInverseCommand::new();
        let result = cmd.execute(&CommandArgs::new().arg(handle));
        assert_eq!(result.status, CommandStatus::Failed);
    }
}

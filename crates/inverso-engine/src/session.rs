//! Wiring between the edit notifier and an undo stack
//!
//! Every finalized edit log published on this thread becomes an
//! [`UndoInverseCommand`] on the session's stack. The edits already happened,
//! so the command is pushed without executing it.

use crate::commands::{UndoInverseCommand, UndoableCommand};
use crate::config::UndoConfig;
use crate::stack::UndoStack;
use inverso_core::journal::SubscriptionId;
use inverso_core::{EditLogHandle, EditNotifier};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

type PendingLogs = Rc<RefCell<VecDeque<EditLogHandle>>>;

#[derive(Debug)]
pub struct UndoSession {
    stack: Rc<RefCell<UndoStack>>,
    pending: PendingLogs,
    subscription: SubscriptionId,
}

impl UndoSession {
    pub fn new(stack: UndoStack) -> Self {
        let stack = Rc::new(RefCell::new(stack));
        let pending: PendingLogs = Rc::default();

        let target: Weak<RefCell<UndoStack>> = Rc::downgrade(&stack);
        let queue = Rc::clone(&pending);
        let subscription = EditNotifier::subscribe(move |handle| {
            let Some(stack) = target.upgrade() else {
                return;
            };
            // Logs closed from inside a stack call wait for the next flush
            match stack.try_borrow_mut() {
                Ok(mut stack) => push_log(&mut stack, handle.clone()),
                Err(_) => queue.borrow_mut().push_back(handle.clone()),
            };
        });

        Self {
            stack,
            pending,
            subscription,
        }
    }

    pub fn from_config(config: &UndoConfig) -> Self {
        let mut stack = UndoStack::new(config.undo_limit());
        stack.set_enabled(config.undo.enable);
        Self::new(stack)
    }

    /// Push a command of the caller's own. Logs it publishes while running
    /// are queued behind it.
    pub fn push(&self, command: Box<dyn UndoableCommand>, execute: bool) {
        self.flush();
        self.stack.borrow_mut().push(command, execute);
    }

    pub fn undo(&self) -> bool {
        self.flush();
        self.stack.borrow_mut().undo()
    }

    pub fn redo(&self) -> bool {
        self.flush();
        self.stack.borrow_mut().redo()
    }

    pub fn can_undo(&self) -> bool {
        self.flush();
        self.stack.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.flush();
        self.stack.borrow().can_redo()
    }

    pub fn len(&self) -> usize {
        self.flush();
        self.stack.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
        self.stack.borrow_mut().clear();
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.flush();
        self.stack.borrow_mut().set_enabled(enabled);
    }

    pub fn set_undo_limit(&self, limit: usize) {
        self.flush();
        self.stack.borrow_mut().set_undo_limit(limit);
    }

    /// Read the underlying stack
    pub fn with_stack<R>(&self, f: impl FnOnce(&UndoStack) -> R) -> R {
        self.flush();
        f(&self.stack.borrow())
    }

    fn flush(&self) {
        let queued: Vec<_> = self.pending.borrow_mut().drain(..).collect();
        if queued.is_empty() {
            return;
        }
        let mut stack = self.stack.borrow_mut();
        for handle in queued {
            push_log(&mut stack, handle);
        }
    }
}

impl Default for UndoSession {
    fn default() -> Self {
        Self::new(UndoStack::default())
    }
}

impl Drop for UndoSession {
    fn drop(&mut self) {
        EditNotifier::unsubscribe(self.subscription);
    }
}

fn push_log(stack: &mut UndoStack, handle: EditLogHandle) {
    tracing::debug!(
        component = module_path!(),
        op = "record_history",
        log_len = handle.len(),
        "Edit log added to undo history"
    );
    stack.push(Box::new(UndoInverseCommand::from_handle(handle)), false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_unsubscribes() {
        let before = EditNotifier::subscriber_count();
        let session = UndoSession::default();
        assert_eq!(EditNotifier::subscriber_count(), before + 1);
        drop(session);
        assert_eq!(EditNotifier::subscriber_count(), before);
    }

    #[test]
    fn test_from_config_applies_limit_and_enable() {
        let mut config = UndoConfig::default();
        config.undo.stack_size = 7;
        config.undo.enable = false;
        let session = UndoSession::from_config(&config);
        session.with_stack(|stack| {
            assert_eq!(stack.undo_limit(), 7);
            assert!(!stack.is_enabled());
        });
    }
}

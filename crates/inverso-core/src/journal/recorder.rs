use std::cell::RefCell;
use std::marker::PhantomData;

use inverso_core_types::TransactionId;

use super::log::EditLog;
use crate::edit::EditOp;
use crate::errors::InversoError;
use crate::log_coding_error;

#[derive(Default)]
struct RecorderState {
    /// One partial log per open scope, outermost first
    logs: Vec<EditLog>,
    mute_depth: usize,
    transaction_id: Option<TransactionId>,
}

thread_local! {
    static RECORDER: RefCell<RecorderState> = RefCell::new(RecorderState::default());
}

enum ExitOutcome {
    Closed(EditLog),
    Nested,
    Unbalanced,
}

/// Per-thread recording context
///
/// Recording happens iff `depth() > 0 && mute_depth() == 0`. Each thread
/// has its own independent recorder.
pub struct EditRecorder;

impl EditRecorder {
    /// Open a scope; returns the new depth
    pub fn enter() -> usize {
        RECORDER.with(|recorder| {
            let mut state = recorder.borrow_mut();
            if state.logs.is_empty() {
                state.transaction_id = Some(TransactionId::new());
            }
            state.logs.push(EditLog::new());
            state.logs.len()
        })
    }

    /// Close the innermost scope
    ///
    /// At the outermost close the accumulated log is returned. A nested
    /// close folds its partial log into the enclosing one and returns
    /// `None`. Closing with no open scope is a coding error.
    pub fn exit() -> Option<EditLog> {
        let outcome = RECORDER.with(|recorder| {
            let mut state = recorder.borrow_mut();
            let Some(mut inner) = state.logs.pop() else {
                return ExitOutcome::Unbalanced;
            };
            match state.logs.last_mut() {
                Some(outer) => {
                    outer.merge_inversions_from(&mut inner);
                    ExitOutcome::Nested
                }
                None => {
                    state.transaction_id = None;
                    ExitOutcome::Closed(inner)
                }
            }
        });

        match outcome {
            ExitOutcome::Closed(log) => Some(log),
            ExitOutcome::Nested => None,
            ExitOutcome::Unbalanced => {
                log_coding_error!("exit", InversoError::UnbalancedTransaction);
                None
            }
        }
    }

    /// Hand `op` to the innermost open log; false if not recording
    pub fn record(op: EditOp) -> bool {
        RECORDER.with(|recorder| {
            let mut state = recorder.borrow_mut();
            if state.mute_depth > 0 {
                return false;
            }
            match state.logs.last_mut() {
                Some(log) => {
                    log.add(op);
                    true
                }
                None => false,
            }
        })
    }

    pub fn depth() -> usize {
        RECORDER.with(|recorder| recorder.borrow().logs.len())
    }

    pub fn mute() {
        RECORDER.with(|recorder| recorder.borrow_mut().mute_depth += 1);
    }

    pub fn unmute() {
        RECORDER.with(|recorder| {
            let mut state = recorder.borrow_mut();
            state.mute_depth = state.mute_depth.saturating_sub(1);
        });
    }

    /// Mute until the returned guard is dropped
    pub fn muted() -> MuteGuard {
        Self::mute();
        MuteGuard {
            _not_send: PhantomData,
        }
    }

    pub fn mute_depth() -> usize {
        RECORDER.with(|recorder| recorder.borrow().mute_depth)
    }

    pub fn is_muted() -> bool {
        Self::mute_depth() > 0
    }

    pub fn is_recording() -> bool {
        RECORDER.with(|recorder| {
            let state = recorder.borrow();
            !state.logs.is_empty() && state.mute_depth == 0
        })
    }

    /// Id of the currently open outermost transaction
    pub fn transaction_id() -> Option<TransactionId> {
        RECORDER.with(|recorder| recorder.borrow().transaction_id.clone())
    }
}

/// Keeps the recorder muted while alive
#[must_use = "recording resumes as soon as the guard is dropped"]
pub struct MuteGuard {
    _not_send: PhantomData<*const ()>,
}

impl Drop for MuteGuard {
    fn drop(&mut self) {
        EditRecorder::unmute();
    }
}

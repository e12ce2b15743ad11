use std::time::Instant;

use super::log::{EditLog, EditLogHandle};
use super::notify::EditNotifier;
use super::recorder::EditRecorder;
use crate::{log_op_end, log_op_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloseMode {
    /// Publish a non-empty log through the notifier at the outermost close
    Publish,
    /// Hand the log back to the owner; discard it if dropped
    Detached,
}

/// RAII bracket around [`EditRecorder::enter`] / [`EditRecorder::exit`]
///
/// Dropping an open block closes it, including during unwinding; whatever
/// was recorded so far is packaged, nothing is rolled back.
///
/// ```
/// use inverso_core::journal::{EditRecorder, TransactionBlock};
///
/// let block = TransactionBlock::new();
/// assert_eq!(EditRecorder::depth(), 1);
/// // Nothing was recorded, so nothing is published.
/// assert!(block.close().is_none());
/// assert_eq!(EditRecorder::depth(), 0);
/// ```
#[derive(Debug)]
#[must_use = "a transaction closes as soon as the block is dropped"]
pub struct TransactionBlock {
    mode: CloseMode,
    open: bool,
    started: Instant,
}

impl TransactionBlock {
    /// Open a scope whose outermost close publishes the finalized log
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::open(CloseMode::Publish)
    }

    /// Open a scope whose log is returned by [`finish`](Self::finish)
    /// instead of being published
    pub fn detached() -> Self {
        Self::open(CloseMode::Detached)
    }

    fn open(mode: CloseMode) -> Self {
        let depth = EditRecorder::enter();
        if depth == 1 && mode == CloseMode::Publish {
            log_op_start!("transaction");
        }
        Self {
            mode,
            open: true,
            started: Instant::now(),
        }
    }

    /// Close the scope
    ///
    /// Returns the published handle when this was the outermost scope and
    /// something was recorded. A detached block's log is discarded.
    pub fn close(mut self) -> Option<EditLogHandle> {
        self.open = false;
        match self.mode {
            CloseMode::Publish => self.publish(),
            CloseMode::Detached => {
                EditRecorder::exit();
                None
            }
        }
    }

    /// Close the scope and take the log without publishing it
    ///
    /// `None` unless this was the outermost scope.
    pub fn finish(mut self) -> Option<EditLog> {
        self.open = false;
        EditRecorder::exit()
    }

    fn publish(&mut self) -> Option<EditLogHandle> {
        let transaction_id = EditRecorder::transaction_id();
        let log = EditRecorder::exit()?;
        if log.is_empty() {
            return None;
        }

        let log_len = log.len();
        let handle = EditLogHandle::new(log, transaction_id);
        let delivered = EditNotifier::publish(&handle);
        log_op_end!(
            "transaction",
            duration_ms = self.started.elapsed().as_millis() as u64,
            log_len = log_len,
            subscribers = delivered,
            transaction_id = handle.transaction_id().map(|id| id.to_string()).unwrap_or_default()
        );
        Some(handle)
    }
}

impl Drop for TransactionBlock {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        match self.mode {
            CloseMode::Publish => {
                self.publish();
            }
            CloseMode::Detached => {
                EditRecorder::exit();
            }
        }
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use inverso_core_types::TransactionId;

use super::recorder::EditRecorder;
use super::transaction::TransactionBlock;
use crate::edit::{EditKind, EditOp};
use crate::errors::InversoError;
use crate::{log_coding_error, log_op_end, log_op_start};

/// Inverse of one transaction, in forward-mutation order
///
/// Move-only: a log is owned by the recorder while its transaction is
/// open and by whoever takes it at the outermost close afterwards.
#[derive(Debug, Default)]
pub struct EditLog {
    ops: Vec<EditOp>,
}

impl EditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `op`, or fold it into the last op when that op absorbs it
    ///
    /// Only the immediately preceding op is considered.
    pub fn add(&mut self, op: EditOp) {
        if let Some(last) = self.ops.last_mut() {
            if last.kind() == op.kind() && last.merge_with(&op) {
                return;
            }
        }
        self.ops.push(op);
    }

    /// Replay the log backwards, then hold the opposite-direction log
    ///
    /// The replay runs inside a fresh recording scope, so the store hooks
    /// capture a new log that undoes this replay. Every op is applied even
    /// after one fails; the result is true only if all succeeded. Called
    /// inside an open transaction this logs a coding error and does nothing.
    pub fn invert(&mut self) -> bool {
        let depth = EditRecorder::depth();
        if depth != 0 {
            log_coding_error!(
                "invert",
                InversoError::InvertInsideTransaction { depth },
                log_len = self.ops.len()
            );
            return false;
        }

        let start = std::time::Instant::now();
        log_op_start!("invert", log_len = self.ops.len());

        let block = TransactionBlock::detached();
        let mut ok = true;
        for op in self.ops.iter().rev() {
            ok &= op.apply();
        }
        self.ops.clear();
        if let Some(mut replayed) = block.finish() {
            self.merge_inversions_from(&mut replayed);
        }

        log_op_end!(
            "invert",
            duration_ms = start.elapsed().as_millis() as u64,
            log_len = self.ops.len(),
            success = ok
        );
        ok
    }

    /// Absorb all of `other`'s ops in order, leaving `other` empty
    pub fn merge_inversions_from(&mut self, other: &mut EditLog) {
        for op in std::mem::take(&mut other.ops) {
            self.add(op);
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn kinds(&self) -> Vec<EditKind> {
        self.ops.iter().map(EditOp::kind).collect()
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }
}

/// Shared handle to a finalized log
///
/// Cloning shares the log; inverting through any clone swaps it for all.
#[derive(Debug, Clone)]
pub struct EditLogHandle {
    log: Rc<RefCell<EditLog>>,
    transaction_id: Option<TransactionId>,
}

impl EditLogHandle {
    pub fn new(log: EditLog, transaction_id: Option<TransactionId>) -> Self {
        Self {
            log: Rc::new(RefCell::new(log)),
            transaction_id,
        }
    }

    /// See [`EditLog::invert`]. Also false if the log is already being inverted.
    pub fn invert(&self) -> bool {
        match self.log.try_borrow_mut() {
            Ok(mut log) => log.invert(),
            Err(_) => {
                log_coding_error!("invert", InversoError::LogInUse);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.log.try_borrow().map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kinds(&self) -> Vec<EditKind> {
        self.log.try_borrow().map(|log| log.kinds()).unwrap_or_default()
    }

    /// Id of the transaction that produced the log
    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    /// Read the log in place; `None` while it is being inverted
    pub fn with_log<R>(&self, f: impl FnOnce(&EditLog) -> R) -> Option<R> {
        self.log.try_borrow().ok().map(|log| f(&log))
    }

    pub fn ptr_eq(&self, other: &EditLogHandle) -> bool {
        Rc::ptr_eq(&self.log, &other.log)
    }
}

impl From<EditLog> for EditLogHandle {
    fn from(log: EditLog) -> Self {
        Self::new(log, None)
    }
}

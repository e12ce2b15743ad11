use crate::errors::InversoError;
use crate::model::{ChildValue, DocumentPath, FieldKey, TimeCode, Token, Value};
use crate::store::StoreRef;

use super::child_list::{ChildAction, ChildListEdit};
use super::field::{DictKey, DictValueEdits, FieldEdits};
use super::spec::{DeletedSubtreeSnapshot, SpecChange, SpecLifecycleEdit};
use super::time_sample::TimeSampleEdits;
use super::warn_restore_failure;

/// Stable kind tag of an [`EditOp`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Field,
    DictValue,
    TimeSample,
    CreateSpec,
    DeleteSpec,
    MoveSpec,
    PushChild,
    PopChild,
}

impl EditKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::Field => "field",
            EditKind::DictValue => "dict_value",
            EditKind::TimeSample => "time_sample",
            EditKind::CreateSpec => "create_spec",
            EditKind::DeleteSpec => "delete_spec",
            EditKind::MoveSpec => "move_spec",
            EditKind::PushChild => "push_child",
            EditKind::PopChild => "pop_child",
        }
    }
}

impl std::fmt::Display for EditKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reversible unit of an edit log
///
/// Applying an op once returns its store to the state right before the
/// forward mutation it captured.
#[derive(Debug)]
pub enum EditOp {
    Field(FieldEdits),
    DictValue(DictValueEdits),
    TimeSample(TimeSampleEdits),
    Spec(SpecLifecycleEdit),
    ChildList(ChildListEdit),
}

impl EditOp {
    // ===== Constructors =====

    pub fn field(
        store: StoreRef,
        path: DocumentPath,
        field: Token,
        previous: Option<Value>,
    ) -> Self {
        EditOp::Field(FieldEdits::new(store, FieldKey::new(path, field), previous))
    }

    pub fn dict_value(
        store: StoreRef,
        path: DocumentPath,
        field: Token,
        key: impl Into<String>,
        previous: Option<Value>,
    ) -> Self {
        let key = DictKey {
            field: FieldKey::new(path, field),
            key: key.into(),
        };
        EditOp::DictValue(DictValueEdits::new(store, key, previous))
    }

    pub fn time_sample(
        store: StoreRef,
        path: DocumentPath,
        time: TimeCode,
        previous: Option<Value>,
    ) -> Self {
        EditOp::TimeSample(TimeSampleEdits::new(store, path, time, previous))
    }

    pub fn create_spec(store: StoreRef, path: DocumentPath) -> Self {
        EditOp::Spec(SpecLifecycleEdit::new(store, SpecChange::Create { path }))
    }

    pub fn delete_spec(store: StoreRef, snapshot: DeletedSubtreeSnapshot) -> Self {
        EditOp::Spec(SpecLifecycleEdit::new(store, SpecChange::Delete { snapshot }))
    }

    pub fn move_spec(store: StoreRef, old_path: DocumentPath, new_path: DocumentPath) -> Self {
        EditOp::Spec(SpecLifecycleEdit::new(store, SpecChange::Move { old_path, new_path }))
    }

    /// Captures a push; applying it pops `value`
    pub fn push_child(
        store: StoreRef,
        path: DocumentPath,
        field: Token,
        value: ChildValue,
    ) -> Self {
        EditOp::ChildList(ChildListEdit::new(store, path, field, value, ChildAction::Pushed))
    }

    /// Captures a pop; applying it pushes `value` back
    pub fn pop_child(store: StoreRef, path: DocumentPath, field: Token, value: ChildValue) -> Self {
        EditOp::ChildList(ChildListEdit::new(store, path, field, value, ChildAction::Popped))
    }

    // ===== Contract =====

    pub fn kind(&self) -> EditKind {
        match self {
            EditOp::Field(_) => EditKind::Field,
            EditOp::DictValue(_) => EditKind::DictValue,
            EditOp::TimeSample(_) => EditKind::TimeSample,
            EditOp::Spec(edit) => edit.kind(),
            EditOp::ChildList(edit) => edit.kind(),
        }
    }

    pub fn store(&self) -> &StoreRef {
        match self {
            EditOp::Field(edit) => edit.store(),
            EditOp::DictValue(edit) => edit.store(),
            EditOp::TimeSample(edit) => edit.store(),
            EditOp::Spec(edit) => edit.store(),
            EditOp::ChildList(edit) => edit.store(),
        }
    }

    /// Absorb `other` into `self`; true iff `other` is now redundant
    ///
    /// Only field, dictionary and time-sample containers merge, and only
    /// with an op of the same kind on the same live store.
    pub fn merge_with(&mut self, other: &EditOp) -> bool {
        if self.store() != other.store() || self.store().is_expired() {
            return false;
        }
        match (self, other) {
            (EditOp::Field(this), EditOp::Field(that)) => this.absorb(that),
            (EditOp::DictValue(this), EditOp::DictValue(that)) => this.absorb(that),
            (EditOp::TimeSample(this), EditOp::TimeSample(that)) => this.absorb(that),
            _ => false,
        }
    }

    /// Restore the captured state in the target store
    ///
    /// Returns false, with a warning logged, when the store has expired,
    /// is already borrowed, or rejects the restore.
    pub fn apply(&self) -> bool {
        let store_ref = self.store();
        let kind = self.kind();

        let Some(handle) = store_ref.upgrade() else {
            warn_restore_failure(
                store_ref.id(),
                kind,
                InversoError::ExpiredTarget {
                    store_id: store_ref.id().clone(),
                },
            );
            return false;
        };
        let Ok(mut store) = handle.try_borrow_mut() else {
            warn_restore_failure(
                store_ref.id(),
                kind,
                InversoError::StoreBusy {
                    store_id: store_ref.id().clone(),
                },
            );
            return false;
        };

        let result = match self {
            EditOp::Field(edit) => return edit.restore(&mut store),
            EditOp::DictValue(edit) => return edit.restore(&mut store),
            EditOp::TimeSample(edit) => return edit.restore(&mut store),
            EditOp::Spec(edit) => edit.restore(&mut store),
            EditOp::ChildList(edit) => edit.restore(&mut store),
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                warn_restore_failure(store_ref.id(), kind, err);
                false
            }
        }
    }
}

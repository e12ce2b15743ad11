use crate::errors::Result;
use crate::model::{ChildValue, DocumentPath, Token};
use crate::store::{DocumentStore, StoreRef};

use super::EditKind;

/// Which list mutation was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildAction {
    Pushed,
    Popped,
}

/// Push or pop on an ordered list field. Never merges, so a sequence of
/// list edits replays in exact reverse order.
#[derive(Debug)]
pub struct ChildListEdit {
    store: StoreRef,
    path: DocumentPath,
    field: Token,
    value: ChildValue,
    action: ChildAction,
}

impl ChildListEdit {
    pub fn new(
        store: StoreRef,
        path: DocumentPath,
        field: Token,
        value: ChildValue,
        action: ChildAction,
    ) -> Self {
        Self {
            store,
            path,
            field,
            value,
            action,
        }
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn field(&self) -> &Token {
        &self.field
    }

    pub fn value(&self) -> &ChildValue {
        &self.value
    }

    pub fn action(&self) -> ChildAction {
        self.action
    }

    pub fn kind(&self) -> EditKind {
        match self.action {
            ChildAction::Pushed => EditKind::PushChild,
            ChildAction::Popped => EditKind::PopChild,
        }
    }

    pub(crate) fn restore(&self, store: &mut DocumentStore) -> Result<()> {
        match self.action {
            ChildAction::Pushed => store.pop_child(&self.path, &self.field, &self.value),
            ChildAction::Popped => store.push_child(&self.path, &self.field, &self.value),
        }
    }
}

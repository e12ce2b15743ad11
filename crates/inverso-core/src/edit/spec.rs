use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::{DocumentPath, SpecData, SpecType};
use crate::store::{DocumentStore, LayerData, StoreRef};

use super::EditKind;

/// Full copy of a deleted spec and all of its descendants
///
/// Captured through [`LayerData::traverse`] right before the delete is
/// committed, and consumed only when the delete is inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedSubtreeSnapshot {
    root: DocumentPath,
    spec_type: SpecType,
    specs: BTreeMap<DocumentPath, SpecData>,
}

impl DeletedSubtreeSnapshot {
    /// Snapshot the subtree rooted at `root`; `None` if there is no such spec
    pub fn capture(layer: &LayerData, root: &DocumentPath) -> Option<Self> {
        let spec_type = layer.spec_type(root)?;
        let mut specs = BTreeMap::new();
        layer.traverse(root, |path, data| {
            specs.insert(path.clone(), data.clone());
        });
        Some(Self {
            root: root.clone(),
            spec_type,
            specs,
        })
    }

    pub fn root(&self) -> &DocumentPath {
        &self.root
    }

    pub fn spec_type(&self) -> SpecType {
        self.spec_type
    }

    /// Number of specs in the snapshot, root included
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, path: &DocumentPath) -> Option<&SpecData> {
        self.specs.get(path)
    }

    /// Captured specs, parent before child
    pub fn specs(&self) -> impl Iterator<Item = (&DocumentPath, &SpecData)> {
        self.specs.iter()
    }
}

/// Structural change to the spec hierarchy
#[derive(Debug)]
pub enum SpecChange {
    /// A spec was created; inverse deletes it
    Create { path: DocumentPath },
    /// A subtree was deleted; inverse recreates it from the snapshot
    Delete { snapshot: DeletedSubtreeSnapshot },
    /// A subtree was moved; inverse moves it back
    Move {
        old_path: DocumentPath,
        new_path: DocumentPath,
    },
}

/// Create/delete/move edit. Never merges.
#[derive(Debug)]
pub struct SpecLifecycleEdit {
    store: StoreRef,
    change: SpecChange,
}

impl SpecLifecycleEdit {
    pub fn new(store: StoreRef, change: SpecChange) -> Self {
        Self { store, change }
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    pub fn change(&self) -> &SpecChange {
        &self.change
    }

    pub fn kind(&self) -> EditKind {
        match self.change {
            SpecChange::Create { .. } => EditKind::CreateSpec,
            SpecChange::Delete { .. } => EditKind::DeleteSpec,
            SpecChange::Move { .. } => EditKind::MoveSpec,
        }
    }

    /// Undo the structural change
    ///
    /// Recreating a deleted subtree goes through `create_spec` for the root
    /// only; descendant data is written back without hooks.
    pub(crate) fn restore(&self, store: &mut DocumentStore) -> Result<()> {
        match &self.change {
            SpecChange::Create { path } => store.delete_spec(path),
            SpecChange::Delete { snapshot } => {
                store.create_spec(snapshot.root(), snapshot.spec_type())?;
                store.restore_subtree(snapshot.root(), snapshot.specs())
            }
            SpecChange::Move { old_path, new_path } => store.move_spec(new_path, old_path),
        }
    }
}

//! Binding of store hooks to the edit recorder

use crate::edit::{DeletedSubtreeSnapshot, EditOp};
use crate::journal::EditRecorder;
use crate::log_perf_warning;
use crate::model::{ChildValue, DocumentPath, SpecType, TimeCode, Token, Value, TIME_SAMPLES_FIELD};
use crate::store::{
    DocumentStore, LayerData, StoreDelegate, StoreHandle, StoreProxy, StoreRef, StoreRegistry,
};

/// Store delegate that turns every mutation into an inverse [`EditOp`]
///
/// One delegate is bound to one store. Every hook marks the store dirty;
/// inside a transaction it also captures the pre-mutation state and hands
/// the resulting op to the [`EditRecorder`].
#[derive(Debug, Clone)]
pub struct InterceptionDelegate {
    store: StoreRef,
}

impl InterceptionDelegate {
    pub fn new(store: StoreRef) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    fn capture<F>(&self, proxy: &mut StoreProxy<'_>, hook: &'static str, build: F)
    where
        F: FnOnce(&LayerData) -> Option<EditOp>,
    {
        proxy.mark_dirty();
        if EditRecorder::depth() == 0 {
            return;
        }
        if EditRecorder::is_muted() {
            log_perf_warning!(
                "record",
                "store edited while recording is muted; the edit cannot be undone",
                store_id = proxy.store_id().as_str(),
                hook = hook
            );
            return;
        }
        if let Some(op) = build(proxy.layer()) {
            EditRecorder::record(op);
        }
    }
}

impl StoreDelegate for InterceptionDelegate {
    fn on_set_field(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        _value: Option<&Value>,
    ) {
        self.capture(store, "set_field", |layer| {
            let previous = layer.get_field(path, field).cloned();
            Some(EditOp::field(self.store.clone(), path.clone(), field.clone(), previous))
        });
    }

    fn on_set_dict_value(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        key: &str,
        _value: Option<&Value>,
    ) {
        self.capture(store, "set_dict_value", |layer| {
            let previous = layer.get_dict_value(path, field, key).cloned();
            Some(EditOp::dict_value(self.store.clone(), path.clone(), field.clone(), key, previous))
        });
    }

    fn on_set_time_sample(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        time: TimeCode,
        _value: Option<&Value>,
    ) {
        self.capture(store, "set_time_sample", |layer| {
            // No sample field yet: restoring means erasing the whole field.
            if layer.time_samples(path).is_none() {
                return Some(EditOp::field(
                    self.store.clone(),
                    path.clone(),
                    Token::from(TIME_SAMPLES_FIELD),
                    None,
                ));
            }
            let previous = layer.query_time_sample(path, time).cloned();
            Some(EditOp::time_sample(self.store.clone(), path.clone(), time, previous))
        });
    }

    fn on_create_spec(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        _spec_type: SpecType,
    ) {
        self.capture(store, "create_spec", |_| {
            Some(EditOp::create_spec(self.store.clone(), path.clone()))
        });
    }

    fn on_delete_spec(&mut self, store: &mut StoreProxy<'_>, path: &DocumentPath) {
        self.capture(store, "delete_spec", |layer| {
            DeletedSubtreeSnapshot::capture(layer, path)
                .map(|snapshot| EditOp::delete_spec(self.store.clone(), snapshot))
        });
    }

    fn on_move_spec(&mut self, store: &mut StoreProxy<'_>, from: &DocumentPath, to: &DocumentPath) {
        self.capture(store, "move_spec", |_| {
            Some(EditOp::move_spec(self.store.clone(), from.clone(), to.clone()))
        });
    }

    fn on_push_child(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        value: &ChildValue,
    ) {
        self.capture(store, "push_child", |_| {
            Some(EditOp::push_child(self.store.clone(), path.clone(), field.clone(), value.clone()))
        });
    }

    fn on_pop_child(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        value: &ChildValue,
    ) {
        self.capture(store, "pop_child", |_| {
            Some(EditOp::pop_child(self.store.clone(), path.clone(), field.clone(), value.clone()))
        });
    }
}

/// Bind an [`InterceptionDelegate`] to `store`, replacing any delegate
pub fn attach(store: &mut DocumentStore) {
    let delegate = InterceptionDelegate::new(StoreRef::new(store.id().clone()));
    store.set_delegate(Box::new(delegate));
}

/// Create a registered store whose edits are recorded
pub fn open_store() -> StoreHandle {
    let mut store = DocumentStore::new();
    attach(&mut store);
    StoreRegistry::register(store)
}

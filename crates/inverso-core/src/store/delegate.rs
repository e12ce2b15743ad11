use inverso_core_types::StoreId;

use super::layer::LayerData;
use crate::model::{ChildValue, DocumentPath, SpecType, TimeCode, Token, Value};

/// View of a store handed to hooks while the store itself is borrowed
///
/// The layer still holds the pre-mutation state.
pub struct StoreProxy<'a> {
    pub(crate) id: &'a StoreId,
    pub(crate) layer: &'a LayerData,
    pub(crate) dirty: &'a mut bool,
}

impl StoreProxy<'_> {
    pub fn store_id(&self) -> &StoreId {
        self.id
    }

    pub fn layer(&self) -> &LayerData {
        self.layer
    }

    pub fn mark_dirty(&mut self) {
        *self.dirty = true;
    }
}

/// Mutation hooks fired by [`DocumentStore`](super::DocumentStore)
///
/// Each hook runs after validation and before the change is committed.
/// A `None` value means the field, key or sample is being erased.
pub trait StoreDelegate {
    fn on_set_field(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        value: Option<&Value>,
    );

    fn on_set_dict_value(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        key: &str,
        value: Option<&Value>,
    );

    fn on_set_time_sample(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        time: TimeCode,
        value: Option<&Value>,
    );

    fn on_create_spec(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        spec_type: SpecType,
    );

    fn on_delete_spec(&mut self, store: &mut StoreProxy<'_>, path: &DocumentPath);

    fn on_move_spec(&mut self, store: &mut StoreProxy<'_>, from: &DocumentPath, to: &DocumentPath);

    fn on_push_child(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        value: &ChildValue,
    );

    fn on_pop_child(
        &mut self,
        store: &mut StoreProxy<'_>,
        path: &DocumentPath,
        field: &Token,
        value: &ChildValue,
    );
}

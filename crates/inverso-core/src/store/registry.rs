use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use inverso_core_types::StoreId;

use super::document::DocumentStore;

/// Shared handle to a live store
pub type StoreHandle = Rc<RefCell<DocumentStore>>;

thread_local! {
    static STORES: RefCell<HashMap<StoreId, Weak<RefCell<DocumentStore>>>> =
        RefCell::new(HashMap::new());
}

/// Per-thread lookup of live stores by id
///
/// Holds weak references only; a store expires when its last handle is
/// dropped.
pub struct StoreRegistry;

impl StoreRegistry {
    /// Wrap a store in a handle and make it resolvable by id
    pub fn register(store: DocumentStore) -> StoreHandle {
        let id = store.id().clone();
        let handle = Rc::new(RefCell::new(store));
        STORES.with(|stores| {
            let mut stores = stores.borrow_mut();
            stores.retain(|_, weak| weak.strong_count() > 0);
            stores.insert(id, Rc::downgrade(&handle));
        });
        handle
    }

    pub fn lookup(id: &StoreId) -> Option<StoreHandle> {
        STORES.with(|stores| stores.borrow().get(id).and_then(Weak::upgrade))
    }

    pub fn is_live(id: &StoreId) -> bool {
        STORES.with(|stores| {
            stores
                .borrow()
                .get(id)
                .is_some_and(|weak| weak.strong_count() > 0)
        })
    }

    /// Number of registered stores that are still alive on this thread
    pub fn live_count() -> usize {
        STORES.with(|stores| {
            stores
                .borrow()
                .values()
                .filter(|weak| weak.strong_count() > 0)
                .count()
        })
    }
}

/// Non-owning reference to a store, resolved through the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreRef {
    id: StoreId,
}

impl StoreRef {
    pub fn new(id: StoreId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &StoreId {
        &self.id
    }

    pub fn upgrade(&self) -> Option<StoreHandle> {
        StoreRegistry::lookup(&self.id)
    }

    pub fn is_expired(&self) -> bool {
        !StoreRegistry::is_live(&self.id)
    }
}

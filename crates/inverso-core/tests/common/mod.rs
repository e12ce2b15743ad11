use inverso_core::{open_store, DocumentPath, SpecType, StoreHandle, Token, Value};

/// Parse a path literal
#[allow(dead_code)]
pub fn p(text: &str) -> DocumentPath {
    DocumentPath::parse(text).unwrap()
}

#[allow(dead_code)]
pub fn tok(name: &str) -> Token {
    Token::from(name)
}

/// Open a recorded store and create the given prims outside any transaction
///
/// Paths must be listed parent first.
#[allow(dead_code)]
pub fn store_with_prims(paths: &[&str]) -> StoreHandle {
    let store = open_store();
    for path in paths {
        store
            .borrow_mut()
            .create_spec(&p(path), SpecType::Prim)
            .unwrap();
    }
    store
}

/// Current value of a field, cloned out of the store
#[allow(dead_code)]
pub fn field(store: &StoreHandle, path: &str, name: &str) -> Option<Value> {
    store.borrow().get_field(&p(path), &tok(name)).cloned()
}

#[allow(dead_code)]
pub fn set(store: &StoreHandle, path: &str, name: &str, value: Value) {
    store
        .borrow_mut()
        .set_field(&p(path), &tok(name), value)
        .unwrap();
}

#![allow(dead_code)]

use inverso_core::{open_store, DocumentPath, SpecType, StoreHandle, Token, TransactionBlock, Value};

pub fn p(text: &str) -> DocumentPath {
    DocumentPath::parse(text).unwrap()
}

/// Store with a single prim at /A
pub fn store_with_a() -> StoreHandle {
    let store = open_store();
    store.borrow_mut().create_spec(&p("/A"), SpecType::Prim).unwrap();
    store
}

pub fn value_of(store: &StoreHandle, name: &str) -> Option<Value> {
    store.borrow().get_field(&p("/A"), &Token::from(name)).cloned()
}

/// Set /A.<name> inside its own transaction
pub fn set_in_transaction(store: &StoreHandle, name: &str, value: i64) {
    let block = TransactionBlock::new();
    store
        .borrow_mut()
        .set_field(&p("/A"), &Token::from(name), Value::Int(value))
        .unwrap();
    drop(block);
}

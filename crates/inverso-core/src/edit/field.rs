use std::collections::HashSet;

use crate::model::{DocumentPath, FieldKey, Token, Value};
use crate::store::{DocumentStore, StoreRef};

use super::{warn_restore_failure, EditKind};

/// Previous values of whole fields, keyed by (path, field)
///
/// One container absorbs every adjacent field edit on the same store. A
/// key recorded once keeps its first captured value.
#[derive(Debug)]
pub struct FieldEdits {
    store: StoreRef,
    entries: Vec<(FieldKey, Option<Value>)>,
    keys: HashSet<FieldKey>,
}

impl FieldEdits {
    pub fn new(store: StoreRef, key: FieldKey, previous: Option<Value>) -> Self {
        let mut keys = HashSet::new();
        keys.insert(key.clone());
        Self {
            store,
            entries: vec![(key, previous)],
            keys,
        }
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Captured previous value for `key`; `Some(None)` means the field was absent
    pub fn previous(&self, path: &DocumentPath, field: &Token) -> Option<Option<&Value>> {
        self.entries
            .iter()
            .find(|(key, _)| &key.path == path && &key.field == field)
            .map(|(_, previous)| previous.as_ref())
    }

    pub(crate) fn absorb(&mut self, other: &FieldEdits) -> bool {
        for (key, previous) in &other.entries {
            if self.keys.insert(key.clone()) {
                self.entries.push((key.clone(), previous.clone()));
            }
        }
        true
    }

    pub(crate) fn restore(&self, store: &mut DocumentStore) -> bool {
        let mut ok = true;
        for (key, previous) in self.entries.iter().rev() {
            if let Err(err) = store.write_field(&key.path, &key.field, previous.clone()) {
                warn_restore_failure(store.id(), EditKind::Field, err);
                ok = false;
            }
        }
        ok
    }
}

/// Dictionary key within a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DictKey {
    pub field: FieldKey,
    pub key: String,
}

/// Previous values of dictionary keys, keyed by (path, field, key)
///
/// Same first-value-wins rule as [`FieldEdits`], one level down.
#[derive(Debug)]
pub struct DictValueEdits {
    store: StoreRef,
    entries: Vec<(DictKey, Option<Value>)>,
    keys: HashSet<DictKey>,
}

impl DictValueEdits {
    pub fn new(store: StoreRef, key: DictKey, previous: Option<Value>) -> Self {
        let mut keys = HashSet::new();
        keys.insert(key.clone());
        Self {
            store,
            entries: vec![(key, previous)],
            keys,
        }
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn previous(
        &self,
        path: &DocumentPath,
        field: &Token,
        key: &str,
    ) -> Option<Option<&Value>> {
        self.entries
            .iter()
            .find(|(k, _)| &k.field.path == path && &k.field.field == field && k.key == key)
            .map(|(_, previous)| previous.as_ref())
    }

    pub(crate) fn absorb(&mut self, other: &DictValueEdits) -> bool {
        for (key, previous) in &other.entries {
            if self.keys.insert(key.clone()) {
                self.entries.push((key.clone(), previous.clone()));
            }
        }
        true
    }

    pub(crate) fn restore(&self, store: &mut DocumentStore) -> bool {
        let mut ok = true;
        // Reverse insertion order: an outer key written after a nested one
        // must be restored first.
        for (key, previous) in self.entries.iter().rev() {
            let FieldKey { path, field } = &key.field;
            if let Err(err) = store.write_dict_value(path, field, &key.key, previous.clone()) {
                warn_restore_failure(store.id(), EditKind::DictValue, err);
                ok = false;
            }
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inverso_core_types::StoreId;

    fn key(path: &str, field: &str) -> FieldKey {
        FieldKey::new(DocumentPath::parse(path).unwrap(), Token::from(field))
    }

    fn store_ref() -> StoreRef {
        StoreRef::new(StoreId::from_string("field-tests".to_string()))
    }

    #[test]
    fn test_absorb_keeps_earliest_value_per_key() {
        let mut edits = FieldEdits::new(store_ref(), key("/A", "foo"), Some(Value::Int(0)));
        let later = FieldEdits::new(store_ref(), key("/A", "foo"), Some(Value::Int(1)));
        let other = FieldEdits::new(store_ref(), key("/A", "bar"), None);

        assert!(edits.absorb(&later));
        assert!(edits.absorb(&other));

        let a = DocumentPath::parse("/A").unwrap();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits.previous(&a, &Token::from("foo")), Some(Some(&Value::Int(0))));
        assert_eq!(edits.previous(&a, &Token::from("bar")), Some(None));
    }

    #[test]
    fn test_dict_absorb_distinguishes_keys() {
        let dict_key = |k: &str| DictKey {
            field: key("/A", "customData"),
            key: k.to_string(),
        };
        let mut edits = DictValueEdits::new(store_ref(), dict_key("x"), None);
        edits.absorb(&DictValueEdits::new(store_ref(), dict_key("x"), Some(Value::Int(9))));
        edits.absorb(&DictValueEdits::new(store_ref(), dict_key("y"), Some(Value::Int(1))));

        let a = DocumentPath::parse("/A").unwrap();
        let field = Token::from("customData");
        assert_eq!(edits.len(), 2);
        assert_eq!(edits.previous(&a, &field, "x"), Some(None));
        assert_eq!(edits.previous(&a, &field, "y"), Some(Some(&Value::Int(1))));
    }
}

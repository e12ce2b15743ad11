use std::collections::BTreeMap;

use inverso_core_types::StoreId;

use super::delegate::{StoreDelegate, StoreProxy};
use super::layer::{write_nested, LayerData, DICT_KEY_SEPARATOR};
use crate::errors::{InversoError, Result};
use crate::model::{
    ChildValue, DocumentPath, SpecData, SpecType, TimeCode, Token, Value, TIME_SAMPLES_FIELD,
};

/// Mutable in-memory document keyed by hierarchical paths
///
/// Every primitive validates its arguments, fires the matching
/// [`StoreDelegate`] hook while the old state is still readable, and only
/// then commits. A primitive that fails validation fires no hook and
/// leaves the document untouched.
pub struct DocumentStore {
    id: StoreId,
    layer: LayerData,
    dirty: bool,
    delegate: Option<Box<dyn StoreDelegate>>,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("id", &self.id)
            .field("specs", &self.layer.spec_count())
            .field("dirty", &self.dirty)
            .field("has_delegate", &self.delegate.is_some())
            .finish()
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty store with a fresh id and no delegate
    pub fn new() -> Self {
        Self::with_id(StoreId::new())
    }

    pub fn with_id(id: StoreId) -> Self {
        Self {
            id,
            layer: LayerData::new(),
            dirty: false,
            delegate: None,
        }
    }

    pub fn id(&self) -> &StoreId {
        &self.id
    }

    pub fn layer(&self) -> &LayerData {
        &self.layer
    }

    pub fn has_spec(&self, path: &DocumentPath) -> bool {
        self.layer.has_spec(path)
    }

    pub fn get_field(&self, path: &DocumentPath, field: &Token) -> Option<&Value> {
        self.layer.get_field(path, field)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Install the hook receiver, replacing any previous one
    pub fn set_delegate(&mut self, delegate: Box<dyn StoreDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    // ===== Spec lifecycle =====

    /// Create an empty spec
    ///
    /// # Errors
    ///
    /// `InvalidPath` for the absolute root, `SpecAlreadyExists`, or
    /// `ParentNotFound` when the parent is neither the root nor an
    /// existing spec.
    pub fn create_spec(&mut self, path: &DocumentPath, spec_type: SpecType) -> Result<()> {
        if path.is_root() {
            return Err(InversoError::InvalidPath {
                path: path.to_string(),
                reason: "cannot create the absolute root".to_string(),
            });
        }
        if self.layer.has_spec(path) {
            return Err(InversoError::SpecAlreadyExists {
                path: path.to_string(),
            });
        }
        self.require_parent(path)?;

        self.notify(|d, s| d.on_create_spec(s, path, spec_type));
        self.layer.insert_spec(path.clone(), SpecData::new(spec_type));
        Ok(())
    }

    /// Delete a spec together with all of its descendants
    ///
    /// # Errors
    ///
    /// `SpecNotFound` if no spec exists at `path`.
    pub fn delete_spec(&mut self, path: &DocumentPath) -> Result<()> {
        self.require_spec(path)?;

        self.notify(|d, s| d.on_delete_spec(s, path));
        self.layer.remove_subtree(path);
        Ok(())
    }

    /// Move a spec and its subtree to a new path
    ///
    /// # Errors
    ///
    /// `IllegalMove` when moving the root, onto itself or beneath itself,
    /// `SpecNotFound`, `SpecAlreadyExists` at the destination, or
    /// `ParentNotFound` for the destination's parent.
    pub fn move_spec(&mut self, from: &DocumentPath, to: &DocumentPath) -> Result<()> {
        let illegal = |reason: &str| InversoError::IllegalMove {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        };
        if from.is_root() || to.is_root() {
            return Err(illegal("the absolute root cannot be moved or replaced"));
        }
        self.require_spec(from)?;
        if to.has_prefix(from) {
            return Err(illegal("destination lies within the moved subtree"));
        }
        if self.layer.has_spec(to) {
            return Err(InversoError::SpecAlreadyExists {
                path: to.to_string(),
            });
        }
        self.require_parent(to)?;

        self.notify(|d, s| d.on_move_spec(s, from, to));
        for (path, data) in self.layer.remove_subtree(from) {
            if let Some(moved) = path.replace_prefix(from, to) {
                self.layer.insert_spec(moved, data);
            }
        }
        Ok(())
    }

    // ===== Fields =====

    /// Set (`Some`) or erase (`None`) a field
    ///
    /// Erasing a field that is not set is a no-op and fires no hook.
    ///
    /// # Errors
    ///
    /// `SpecNotFound` if no spec exists at `path`.
    pub fn write_field(
        &mut self,
        path: &DocumentPath,
        field: &Token,
        value: Option<Value>,
    ) -> Result<()> {
        self.require_spec(path)?;
        if value.is_none() && !self.layer.has_field(path, field) {
            return Ok(());
        }

        self.notify(|d, s| d.on_set_field(s, path, field, value.as_ref()));
        if let Some(spec) = self.layer.spec_mut(path) {
            match value {
                Some(value) => {
                    spec.fields.insert(field.clone(), value);
                }
                None => {
                    spec.fields.remove(field);
                }
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`write_field`](Self::write_field).
    pub fn set_field(&mut self, path: &DocumentPath, field: &Token, value: Value) -> Result<()> {
        self.write_field(path, field, Some(value))
    }

    /// # Errors
    ///
    /// See [`write_field`](Self::write_field).
    pub fn erase_field(&mut self, path: &DocumentPath, field: &Token) -> Result<()> {
        self.write_field(path, field, None)
    }

    // ===== Dictionary values =====

    /// Set or erase one key of a dictionary-valued field
    ///
    /// Colon-separated keys address nested dictionaries. Erasing the last
    /// key erases the whole field.
    ///
    /// # Errors
    ///
    /// `SpecNotFound`, `InvalidArgument` for a malformed key, or
    /// `FieldTypeMismatch` if the field holds something other than a
    /// dictionary.
    pub fn write_dict_value(
        &mut self,
        path: &DocumentPath,
        field: &Token,
        key: &str,
        value: Option<Value>,
    ) -> Result<()> {
        self.require_spec(path)?;
        if key.split(DICT_KEY_SEPARATOR).any(str::is_empty) {
            return Err(InversoError::InvalidArgument {
                command: "write_dict_value".to_string(),
                reason: format!("malformed dictionary key '{}'", key),
            });
        }
        match self.layer.get_field(path, field) {
            Some(Value::Dictionary(_)) | None => {}
            Some(_) => return Err(type_mismatch(path, field, "dictionary")),
        }
        if value.is_none() && self.layer.get_dict_value(path, field, key).is_none() {
            return Ok(());
        }

        self.notify(|d, s| d.on_set_dict_value(s, path, field, key, value.as_ref()));
        if let Some(spec) = self.layer.spec_mut(path) {
            let mut dict = match spec.fields.remove(field) {
                Some(Value::Dictionary(dict)) => dict,
                _ => BTreeMap::new(),
            };
            write_nested(&mut dict, key, value);
            if !dict.is_empty() {
                spec.fields.insert(field.clone(), Value::Dictionary(dict));
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`write_dict_value`](Self::write_dict_value).
    pub fn set_dict_value(
        &mut self,
        path: &DocumentPath,
        field: &Token,
        key: &str,
        value: Value,
    ) -> Result<()> {
        self.write_dict_value(path, field, key, Some(value))
    }

    /// # Errors
    ///
    /// See [`write_dict_value`](Self::write_dict_value).
    pub fn erase_dict_value(
        &mut self,
        path: &DocumentPath,
        field: &Token,
        key: &str,
    ) -> Result<()> {
        self.write_dict_value(path, field, key, None)
    }

    // ===== Time samples =====

    /// Set or erase one time sample
    ///
    /// Erasing the last sample erases the time-sample field.
    ///
    /// # Errors
    ///
    /// `SpecNotFound`, or `FieldTypeMismatch` if the time-sample field holds
    /// another kind of value.
    pub fn write_time_sample(
        &mut self,
        path: &DocumentPath,
        time: TimeCode,
        value: Option<Value>,
    ) -> Result<()> {
        self.require_spec(path)?;
        let field = Token::from(TIME_SAMPLES_FIELD);
        match self.layer.get_field(path, &field) {
            Some(Value::TimeSamples(_)) | None => {}
            Some(_) => return Err(type_mismatch(path, &field, "time samples")),
        }
        if value.is_none() && self.layer.query_time_sample(path, time).is_none() {
            return Ok(());
        }

        self.notify(|d, s| d.on_set_time_sample(s, path, time, value.as_ref()));
        if let Some(spec) = self.layer.spec_mut(path) {
            let mut samples = match spec.fields.remove(&field) {
                Some(Value::TimeSamples(samples)) => samples,
                _ => BTreeMap::new(),
            };
            match value {
                Some(value) => {
                    samples.insert(time, value);
                }
                None => {
                    samples.remove(&time);
                }
            }
            if !samples.is_empty() {
                spec.fields.insert(field, Value::TimeSamples(samples));
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// See [`write_time_sample`](Self::write_time_sample).
    pub fn set_time_sample(
        &mut self,
        path: &DocumentPath,
        time: TimeCode,
        value: Value,
    ) -> Result<()> {
        self.write_time_sample(path, time, Some(value))
    }

    /// # Errors
    ///
    /// See [`write_time_sample`](Self::write_time_sample).
    pub fn erase_time_sample(&mut self, path: &DocumentPath, time: TimeCode) -> Result<()> {
        self.write_time_sample(path, time, None)
    }

    // ===== Ordered child lists =====

    /// Append an entry to a token-list or path-list field
    ///
    /// # Errors
    ///
    /// `SpecNotFound`, or `FieldTypeMismatch` if the field holds a list of
    /// the other kind or a non-list value.
    pub fn push_child(
        &mut self,
        path: &DocumentPath,
        field: &Token,
        value: &ChildValue,
    ) -> Result<()> {
        self.require_spec(path)?;
        match (self.layer.get_field(path, field), value) {
            (None, _)
            | (Some(Value::TokenList(_)), ChildValue::Token(_))
            | (Some(Value::PathList(_)), ChildValue::Path(_)) => {}
            (Some(_), ChildValue::Token(_)) => return Err(type_mismatch(path, field, "token list")),
            (Some(_), ChildValue::Path(_)) => return Err(type_mismatch(path, field, "path list")),
        }

        self.notify(|d, s| d.on_push_child(s, path, field, value));
        if let Some(spec) = self.layer.spec_mut(path) {
            match (spec.fields.get_mut(field), value) {
                (Some(Value::TokenList(list)), ChildValue::Token(token)) => {
                    list.push(token.clone())
                }
                (Some(Value::PathList(list)), ChildValue::Path(child)) => list.push(child.clone()),
                (_, ChildValue::Token(token)) => {
                    spec.fields.insert(field.clone(), Value::TokenList(vec![token.clone()]));
                }
                (_, ChildValue::Path(child)) => {
                    spec.fields.insert(field.clone(), Value::PathList(vec![child.clone()]));
                }
            }
        }
        Ok(())
    }

    /// Remove the last entry of a list field, which must equal `value`
    ///
    /// Popping the only entry erases the field.
    ///
    /// # Errors
    ///
    /// `SpecNotFound`, `FieldTypeMismatch` for a non-list field, or
    /// `ChildMismatch` if the last entry differs from `value`.
    pub fn pop_child(
        &mut self,
        path: &DocumentPath,
        field: &Token,
        value: &ChildValue,
    ) -> Result<()> {
        self.require_spec(path)?;
        let last = match self.layer.get_field(path, field) {
            None => None,
            Some(Value::TokenList(list)) => list.last().cloned().map(ChildValue::Token),
            Some(Value::PathList(list)) => list.last().cloned().map(ChildValue::Path),
            Some(_) => return Err(type_mismatch(path, field, "list")),
        };
        if last.as_ref() != Some(value) {
            return Err(InversoError::ChildMismatch {
                path: path.to_string(),
                field: field.to_string(),
                expected: value.to_string(),
                found: last.map_or_else(|| "<empty>".to_string(), |v| v.to_string()),
            });
        }

        self.notify(|d, s| d.on_pop_child(s, path, field, value));
        if let Some(spec) = self.layer.spec_mut(path) {
            let now_empty = match spec.fields.get_mut(field) {
                Some(Value::TokenList(list)) => {
                    list.pop();
                    list.is_empty()
                }
                Some(Value::PathList(list)) => {
                    list.pop();
                    list.is_empty()
                }
                _ => false,
            };
            if now_empty {
                spec.fields.remove(field);
            }
        }
        Ok(())
    }

    // ===== Raw restore =====

    /// Write captured subtree data back without firing hooks
    ///
    /// `root` must already exist; its fields are replaced. Entries outside
    /// the subtree of `root` are ignored.
    ///
    /// # Errors
    ///
    /// `SpecNotFound` if `root` does not exist.
    pub fn restore_subtree<'a, I>(&mut self, root: &DocumentPath, specs: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a DocumentPath, &'a SpecData)>,
    {
        self.require_spec(root)?;
        for (path, data) in specs {
            if path == root {
                if let Some(spec) = self.layer.spec_mut(root) {
                    spec.fields = data.fields.clone();
                }
            } else if path.has_prefix(root) {
                self.layer.insert_spec(path.clone(), data.clone());
            }
        }
        self.dirty = true;
        Ok(())
    }

    // ===== Helpers =====

    fn notify<F>(&mut self, hook: F)
    where
        F: FnOnce(&mut dyn StoreDelegate, &mut StoreProxy<'_>),
    {
        let Self {
            id,
            layer,
            dirty,
            delegate,
        } = self;
        match delegate.as_deref_mut() {
            Some(delegate) => {
                let mut proxy = StoreProxy {
                    id: &*id,
                    layer: &*layer,
                    dirty,
                };
                hook(delegate, &mut proxy);
            }
            None => *dirty = true,
        }
    }

    fn require_spec(&self, path: &DocumentPath) -> Result<()> {
        if self.layer.has_spec(path) {
            Ok(())
        } else {
            Err(InversoError::SpecNotFound {
                path: path.to_string(),
            })
        }
    }

    fn require_parent(&self, path: &DocumentPath) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.is_root() && !self.layer.has_spec(&parent) => {
                Err(InversoError::ParentNotFound {
                    path: path.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

fn type_mismatch(path: &DocumentPath, field: &Token, expected: &str) -> InversoError {
    InversoError::FieldTypeMismatch {
        path: path.to_string(),
        field: field.to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn p(text: &str) -> DocumentPath {
        DocumentPath::parse(text).unwrap()
    }

    /// Records hook names and the pre-commit value seen by set-field
    struct Spy {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl StoreDelegate for Spy {
        fn on_set_field(
            &mut self,
            store: &mut StoreProxy<'_>,
            path: &DocumentPath,
            field: &Token,
            _value: Option<&Value>,
        ) {
            let before = store.layer().get_field(path, field).cloned();
            self.calls.borrow_mut().push(format!("set_field before={:?}", before));
        }
        fn on_set_dict_value(
            &mut self,
            _: &mut StoreProxy<'_>,
            _: &DocumentPath,
            _: &Token,
            key: &str,
            _: Option<&Value>,
        ) {
            self.calls.borrow_mut().push(format!("set_dict_value {}", key));
        }
        fn on_set_time_sample(
            &mut self,
            _: &mut StoreProxy<'_>,
            _: &DocumentPath,
            time: TimeCode,
            _: Option<&Value>,
        ) {
            self.calls.borrow_mut().push(format!("set_time_sample {}", time));
        }
        fn on_create_spec(&mut self, _: &mut StoreProxy<'_>, path: &DocumentPath, _: SpecType) {
            self.calls.borrow_mut().push(format!("create {}", path));
        }
        fn on_delete_spec(&mut self, _: &mut StoreProxy<'_>, path: &DocumentPath) {
            self.calls.borrow_mut().push(format!("delete {}", path));
        }
        fn on_move_spec(&mut self, _: &mut StoreProxy<'_>, from: &DocumentPath, to: &DocumentPath) {
            self.calls.borrow_mut().push(format!("move {} {}", from, to));
        }
        fn on_push_child(
            &mut self,
            _: &mut StoreProxy<'_>,
            _: &DocumentPath,
            _: &Token,
            value: &ChildValue,
        ) {
            self.calls.borrow_mut().push(format!("push {}", value));
        }
        fn on_pop_child(
            &mut self,
            _: &mut StoreProxy<'_>,
            _: &DocumentPath,
            _: &Token,
            value: &ChildValue,
        ) {
            self.calls.borrow_mut().push(format!("pop {}", value));
        }
    }

    fn spied_store() -> (DocumentStore, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut store = DocumentStore::new();
        store.set_delegate(Box::new(Spy {
            calls: calls.clone(),
        }));
        (store, calls)
    }

    #[test]
    fn test_create_requires_parent_unless_root_child() {
        let mut store = DocumentStore::new();
        assert!(matches!(
            store.create_spec(&p("/A/B"), SpecType::Prim),
            Err(InversoError::ParentNotFound { .. })
        ));
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.create_spec(&p("/A/B"), SpecType::Prim).unwrap();
        assert!(matches!(
            store.create_spec(&p("/A"), SpecType::Prim),
            Err(InversoError::SpecAlreadyExists { .. })
        ));
        assert!(store.create_spec(&DocumentPath::root(), SpecType::Prim).is_err());
    }

    #[test]
    fn test_hook_sees_pre_commit_state() {
        let (mut store, calls) = spied_store();
        let foo = Token::from("foo");
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.set_field(&p("/A"), &foo, Value::Int(1)).unwrap();
        store.set_field(&p("/A"), &foo, Value::Int(2)).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls[1], "set_field before=None");
        assert_eq!(calls[2], "set_field before=Some(Int(1))");
        assert_eq!(store.get_field(&p("/A"), &foo), Some(&Value::Int(2)));
    }

    #[test]
    fn test_failed_validation_fires_no_hook() {
        let (mut store, calls) = spied_store();
        assert!(store.delete_spec(&p("/Missing")).is_err());
        assert!(store.erase_field(&p("/Missing"), &Token::from("x")).is_err());
        assert!(calls.borrow().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_erase_absent_field_is_silent_noop() {
        let (mut store, calls) = spied_store();
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.erase_field(&p("/A"), &Token::from("x")).unwrap();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_move_subtree() {
        let mut store = DocumentStore::new();
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.create_spec(&p("/A/B"), SpecType::Prim).unwrap();
        store.create_spec(&p("/C"), SpecType::Prim).unwrap();

        assert!(matches!(
            store.move_spec(&p("/A"), &p("/A/B/X")),
            Err(InversoError::IllegalMove { .. })
        ));
        assert!(matches!(
            store.move_spec(&p("/A"), &p("/C")),
            Err(InversoError::SpecAlreadyExists { .. })
        ));

        store.move_spec(&p("/A"), &p("/C/A2")).unwrap();
        assert_eq!(store.layer().list_specs(), vec![p("/C"), p("/C/A2"), p("/C/A2/B")]);
    }

    #[test]
    fn test_dict_last_key_erases_field() {
        let mut store = DocumentStore::new();
        let field = Token::from("customData");
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.set_dict_value(&p("/A"), &field, "a:b", Value::Int(1)).unwrap();
        assert!(store.layer().has_field(&p("/A"), &field));
        store.erase_dict_value(&p("/A"), &field, "a:b").unwrap();
        assert!(!store.layer().has_field(&p("/A"), &field));
    }

    #[test]
    fn test_dict_on_scalar_field_is_type_mismatch() {
        let mut store = DocumentStore::new();
        let field = Token::from("foo");
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.set_field(&p("/A"), &field, Value::Int(1)).unwrap();
        assert!(matches!(
            store.set_dict_value(&p("/A"), &field, "k", Value::Int(2)),
            Err(InversoError::FieldTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_time_samples_last_erase_removes_field() {
        let mut store = DocumentStore::new();
        store.create_spec(&p("/A"), SpecType::Attribute).unwrap();
        store.set_time_sample(&p("/A"), TimeCode::new(1.0), Value::Double(0.5)).unwrap();
        store.set_time_sample(&p("/A"), TimeCode::new(2.0), Value::Double(0.7)).unwrap();
        assert_eq!(store.layer().time_samples(&p("/A")).map(|s| s.len()), Some(2));

        store.erase_time_sample(&p("/A"), TimeCode::new(1.0)).unwrap();
        store.erase_time_sample(&p("/A"), TimeCode::new(2.0)).unwrap();
        assert!(store.layer().time_samples(&p("/A")).is_none());
    }

    #[test]
    fn test_pop_child_must_match_last_entry() {
        let (mut store, calls) = spied_store();
        let field = Token::from("children");
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        store.push_child(&p("/A"), &field, &ChildValue::Token(Token::from("x"))).unwrap();
        store.push_child(&p("/A"), &field, &ChildValue::Token(Token::from("y"))).unwrap();

        assert!(matches!(
            store.pop_child(&p("/A"), &field, &ChildValue::Token(Token::from("x"))),
            Err(InversoError::ChildMismatch { .. })
        ));
        assert!(matches!(
            store.push_child(&p("/A"), &field, &ChildValue::Path(p("/B"))),
            Err(InversoError::FieldTypeMismatch { .. })
        ));

        store.pop_child(&p("/A"), &field, &ChildValue::Token(Token::from("y"))).unwrap();
        store.pop_child(&p("/A"), &field, &ChildValue::Token(Token::from("x"))).unwrap();
        assert!(!store.layer().has_field(&p("/A"), &field));
        assert_eq!(calls.borrow().last().map(String::as_str), Some("pop x"));
    }

    #[test]
    fn test_restore_subtree_fires_no_hooks() {
        let (mut store, calls) = spied_store();
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        let mut specs = BTreeMap::new();
        let mut root = SpecData::new(SpecType::Prim);
        root.fields.insert(Token::from("foo"), Value::Int(7));
        specs.insert(p("/A"), root);
        specs.insert(p("/A/B"), SpecData::new(SpecType::Prim));
        specs.insert(p("/Elsewhere"), SpecData::new(SpecType::Prim));

        store.restore_subtree(&p("/A"), specs.iter()).unwrap();
        assert_eq!(calls.borrow().len(), 1);
        assert!(store.has_spec(&p("/A/B")));
        assert!(!store.has_spec(&p("/Elsewhere")));
        assert_eq!(store.get_field(&p("/A"), &Token::from("foo")), Some(&Value::Int(7)));
    }

    #[test]
    fn test_store_without_delegate_still_marks_dirty() {
        let mut store = DocumentStore::new();
        store.create_spec(&p("/A"), SpecType::Prim).unwrap();
        assert!(store.is_dirty());
        store.mark_clean();
        assert!(!store.is_dirty());
    }
}

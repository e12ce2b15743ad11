use std::collections::BTreeMap;
use std::ops::Bound;

use crate::model::{DocumentPath, SpecData, SpecType, TimeCode, Token, Value, TIME_SAMPLES_FIELD};

/// Separator for nested dictionary keys (`outer:inner`)
pub const DICT_KEY_SEPARATOR: char = ':';

/// Ordered spec data of one document
///
/// Read-only view handed to store hooks. Mutation goes through
/// [`DocumentStore`](super::DocumentStore) so hooks fire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerData {
    specs: BTreeMap<DocumentPath, SpecData>,
}

impl LayerData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_spec(&self, path: &DocumentPath) -> bool {
        self.specs.contains_key(path)
    }

    pub fn spec(&self, path: &DocumentPath) -> Option<&SpecData> {
        self.specs.get(path)
    }

    pub fn spec_type(&self, path: &DocumentPath) -> Option<SpecType> {
        self.specs.get(path).map(|s| s.spec_type)
    }

    pub fn get_field(&self, path: &DocumentPath, field: &Token) -> Option<&Value> {
        self.specs.get(path).and_then(|s| s.fields.get(field))
    }

    pub fn has_field(&self, path: &DocumentPath, field: &Token) -> bool {
        self.get_field(path, field).is_some()
    }

    /// Field names of a spec in order; empty if the spec does not exist
    pub fn list_fields(&self, path: &DocumentPath) -> Vec<Token> {
        self.specs
            .get(path)
            .map(|s| s.fields.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Value under `key` in a dictionary field
    ///
    /// Colon-separated keys walk nested dictionaries.
    pub fn get_dict_value(&self, path: &DocumentPath, field: &Token, key: &str) -> Option<&Value> {
        let mut dict = self.get_field(path, field)?.as_dictionary()?;
        let mut parts = key.split(DICT_KEY_SEPARATOR).peekable();
        while let Some(part) = parts.next() {
            let value = dict.get(part)?;
            if parts.peek().is_none() {
                return Some(value);
            }
            dict = value.as_dictionary()?;
        }
        None
    }

    /// All samples of a spec's time-sample field
    pub fn time_samples(&self, path: &DocumentPath) -> Option<&BTreeMap<TimeCode, Value>> {
        self.get_field(path, &Token::from(TIME_SAMPLES_FIELD))?
            .as_time_samples()
    }

    pub fn query_time_sample(&self, path: &DocumentPath, time: TimeCode) -> Option<&Value> {
        self.time_samples(path)?.get(&time)
    }

    /// All spec paths in parent-before-child order
    pub fn list_specs(&self) -> Vec<DocumentPath> {
        self.specs.keys().cloned().collect()
    }

    pub fn spec_count(&self) -> usize {
        self.specs.len()
    }

    /// Visit `root` and every descendant, parent before child
    ///
    /// Visits nothing if `root` does not exist.
    pub fn traverse<F>(&self, root: &DocumentPath, mut visitor: F)
    where
        F: FnMut(&DocumentPath, &SpecData),
    {
        if !self.specs.contains_key(root) {
            return;
        }
        for (path, data) in self
            .specs
            .range((Bound::Included(root), Bound::Unbounded))
            .take_while(|(path, _)| path.has_prefix(root))
        {
            visitor(path, data);
        }
    }

    pub(crate) fn spec_mut(&mut self, path: &DocumentPath) -> Option<&mut SpecData> {
        self.specs.get_mut(path)
    }

    pub(crate) fn insert_spec(&mut self, path: DocumentPath, data: SpecData) {
        self.specs.insert(path, data);
    }

    /// Remove `root` and all descendants, returning them in order
    pub(crate) fn remove_subtree(&mut self, root: &DocumentPath) -> Vec<(DocumentPath, SpecData)> {
        let doomed: Vec<DocumentPath> = self
            .specs
            .range((Bound::Included(root), Bound::Unbounded))
            .take_while(|(path, _)| path.has_prefix(root))
            .map(|(path, _)| path.clone())
            .collect();

        doomed
            .into_iter()
            .filter_map(|path| self.specs.remove(&path).map(|data| (path, data)))
            .collect()
    }
}

/// Write or erase `key` in a (possibly nested) dictionary
///
/// Intermediate dictionaries are created on write. On erase, dictionaries
/// left empty along the key path are pruned.
pub(crate) fn write_nested(dict: &mut BTreeMap<String, Value>, key: &str, value: Option<Value>) {
    match key.split_once(DICT_KEY_SEPARATOR) {
        None => match value {
            Some(value) => {
                dict.insert(key.to_string(), value);
            }
            None => {
                dict.remove(key);
            }
        },
        Some((head, rest)) => {
            if value.is_none() && !matches!(dict.get(head), Some(Value::Dictionary(_))) {
                return;
            }
            let entry = dict
                .entry(head.to_string())
                .or_insert_with(|| Value::Dictionary(BTreeMap::new()));
            if !matches!(entry, Value::Dictionary(_)) {
                *entry = Value::Dictionary(BTreeMap::new());
            }
            let mut now_empty = false;
            if let Value::Dictionary(inner) = entry {
                write_nested(inner, rest, value);
                now_empty = inner.is_empty();
            }
            if now_empty {
                dict.remove(head);
            }
        }
    }
}

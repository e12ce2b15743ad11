use std::collections::BTreeMap;

use crate::model::{DocumentPath, TimeCode, Value};
use crate::store::{DocumentStore, StoreRef};

use super::{warn_restore_failure, EditKind};

/// Previous sample values, per path, sorted by time
///
/// `None` marks a time that had no sample. A time already recorded for a
/// path keeps its first captured value.
#[derive(Debug)]
pub struct TimeSampleEdits {
    store: StoreRef,
    samples: BTreeMap<DocumentPath, Vec<(TimeCode, Option<Value>)>>,
}

impl TimeSampleEdits {
    pub fn new(
        store: StoreRef,
        path: DocumentPath,
        time: TimeCode,
        previous: Option<Value>,
    ) -> Self {
        let mut samples = BTreeMap::new();
        samples.insert(path, vec![(time, previous)]);
        Self { store, samples }
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    /// Recorded samples for `path` in ascending time order
    pub fn samples_for(&self, path: &DocumentPath) -> &[(TimeCode, Option<Value>)] {
        self.samples.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of recorded samples over all paths
    pub fn len(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn absorb(&mut self, other: &TimeSampleEdits) -> bool {
        for (path, incoming) in &other.samples {
            let list = self.samples.entry(path.clone()).or_default();
            for (time, previous) in incoming {
                if let Err(at) = list.binary_search_by(|(t, _)| t.cmp(time)) {
                    list.insert(at, (*time, previous.clone()));
                }
            }
        }
        true
    }

    pub(crate) fn restore(&self, store: &mut DocumentStore) -> bool {
        let mut ok = true;
        for (path, list) in &self.samples {
            for (time, previous) in list {
                if let Err(err) = store.write_time_sample(path, *time, previous.clone()) {
                    warn_restore_failure(store.id(), EditKind::TimeSample, err);
                    ok = false;
                }
            }
        }
        ok
    }
}

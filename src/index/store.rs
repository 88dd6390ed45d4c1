use std::collections::HashMap;
use crate::core::types::Identity;

/// Identity -> item, one entry per live record.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: HashMap<Identity, T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecordStore<T> {
    pub fn new() -> Self {
        RecordStore {
            records: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RecordStore {
            records: HashMap::with_capacity(capacity),
        }
    }

    /// Store `item`, overwriting any record with the same identity.
    /// Returns the previous value.
    pub fn put(&mut self, identity: Identity, item: T) -> Option<T> {
        self.records.insert(identity, item)
    }

    pub fn remove(&mut self, identity: &str) -> Option<T> {
        self.records.remove(identity)
    }

    pub fn get(&self, identity: &str) -> Option<&T> {
        self.records.get(identity)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

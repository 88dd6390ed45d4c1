use std::collections::{HashMap, HashSet};
use crate::core::types::Identity;
use crate::facet::combination::CompositeKey;
use crate::index::posting::PostingList;

/// Composite key -> posting list.
///
/// Entries are created on first reference and never removed by deletes; a key
/// whose identities were all deleted stays behind with an empty list.
#[derive(Debug, Clone, Default)]
pub struct CompositeIndex {
    postings: HashMap<String, PostingList>,
}

impl CompositeIndex {
    pub fn new() -> Self {
        CompositeIndex {
            postings: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        CompositeIndex {
            postings: HashMap::with_capacity(capacity),
        }
    }

    /// Append `identity` to the posting list of every key.
    pub fn add(&mut self, identity: &str, keys: &[CompositeKey]) {
        for key in keys {
            match self.postings.get_mut(key.as_str()) {
                Some(list) => list.push(identity.to_string()),
                None => {
                    let mut list = PostingList::new(key.member_count());
                    list.push(identity.to_string());
                    self.postings.insert(key.as_str().to_string(), list);
                }
            }
        }
    }

    /// Remove every occurrence of `identity` from the posting lists of `keys`.
    /// Keys not in the index are left absent. Returns the number of postings
    /// removed.
    pub fn remove(&mut self, identity: &str, keys: &[CompositeKey]) -> usize {
        let mut removed = 0;
        for key in keys {
            if let Some(list) = self.postings.get_mut(key.as_str()) {
                removed += list.remove_all(identity);
            }
        }
        removed
    }

    pub fn get(&self, key: &str) -> Option<&PostingList> {
        self.postings.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.postings.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PostingList)> {
        self.postings.iter()
    }

    /// Number of keys, including ones with empty posting lists.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Total postings across all keys, duplicates included.
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(PostingList::len).sum()
    }

    pub fn distinct_identities(&self) -> HashSet<&Identity> {
        self.postings.values().flat_map(|list| list.iter()).collect()
    }

    pub fn clear(&mut self) {
        self.postings.clear();
    }
}

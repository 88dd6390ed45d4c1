use rand::Rng;
use crate::core::types::Identity;
use crate::index::composite::CompositeIndex;
use crate::index::store::RecordStore;

/// Exact-match lookups against a composite index.
///
/// Keys are compared as whole strings: case-sensitive, and facet order inside
/// the key matters. There is no partial or fallback matching; an unknown key
/// resolves to nothing.
pub struct QueryResolver<'a, T> {
    index: &'a CompositeIndex,
    records: &'a RecordStore<T>,
}

impl<'a, T: Clone> QueryResolver<'a, T> {
    pub fn new(index: &'a CompositeIndex, records: &'a RecordStore<T>) -> Self {
        QueryResolver { index, records }
    }

    /// Identities posted under `key`, in posting order.
    pub fn identities(&self, key: &str) -> &'a [Identity] {
        match self.index.get(key) {
            Some(list) => list.identities(),
            None => &[],
        }
    }

    /// Current stored item for every identity posted under `key`, in posting
    /// order. Identities with no live record are skipped.
    pub fn resolve(&self, key: &str) -> Vec<T> {
        self.identities(key)
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect()
    }

    /// Pick one posting of `key` uniformly at random and resolve it.
    pub fn sample<R: Rng + ?Sized>(&self, key: &str, rng: &mut R) -> Option<T> {
        let identities = self.identities(key);
        if identities.is_empty() {
            return None;
        }
        let position = rng.gen_range(0..identities.len());
        self.records.get(&identities[position]).cloned()
    }
}

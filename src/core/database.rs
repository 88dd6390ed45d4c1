use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, info, warn};
use crate::core::config::Config;
use crate::core::stats::IndexStats;
use crate::core::types::{Identity, IdentityFn};
use crate::diagnostics::snapshot::IndexSnapshot;
use crate::facet::combination::{composite_keys, CompositeKey};
use crate::facet::extractor::{FacetExtractor, StructuralExtractor};
use crate::facet::facet::Facet;
use crate::facet::structural::Structural;
use crate::index::composite::CompositeIndex;
use crate::index::store::RecordStore;
use crate::search::resolver::QueryResolver;

/// Record store and composite index, guarded together.
struct IndexState<T> {
    records: RecordStore<T>,
    index: CompositeIndex,
}

impl<T> IndexState<T> {
    fn with_capacity(capacity: usize) -> Self {
        IndexState {
            records: RecordStore::with_capacity(capacity),
            index: CompositeIndex::with_capacity(capacity),
        }
    }

    fn apply_insert(&mut self, entry: Prepared, item: T) {
        self.index.add(&entry.identity, &entry.keys);
        debug!(identity = %entry.identity, keys = entry.keys.len(), "inserted record");
        self.records.put(entry.identity, item);
    }

    fn apply_delete(&mut self, entry: &Prepared) -> bool {
        let postings = self.index.remove(&entry.identity, &entry.keys);
        let existed = self.records.remove(&entry.identity).is_some();
        debug!(identity = %entry.identity, postings, existed, "deleted record");
        existed
    }
}

/// Identity and composite keys of one item, computed before any lock is taken.
struct Prepared {
    identity: Identity,
    keys: Vec<CompositeKey>,
}

/// Faceted exact-match index over items of type `T`.
///
/// Every insert posts the item's identity under all 2^n - 1 ordered subsets of
/// its n facets, so any conjunction of facets chosen at query time is a single
/// map lookup. Writes cost O(2^n) and hold the write lock for that long.
///
/// # Stale postings
///
/// Postings are only retracted by a delete that sees the same facet list that
/// produced them. Re-inserting an identity with changed facets leaves the old
/// postings behind, and so does [`update`](Database::update) called after the
/// item was mutated in place. To move a record, delete the old state and insert
/// the new one.
pub struct Database<T> {
    config: Config,
    identity: IdentityFn<T>,
    extractor: Box<dyn FacetExtractor<T>>,
    state: RwLock<IndexState<T>>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl<T: Clone> Database<T> {
    pub fn new<I, E>(identity: I, extractor: E) -> Self
    where
        I: Fn(&T) -> Identity + Send + Sync + 'static,
        E: FacetExtractor<T> + 'static,
    {
        Self::with_config(Config::default(), identity, extractor)
    }

    /// Database with explicit settings. An invalid `facet_warn_threshold` is
    /// logged and replaced by the default.
    pub fn with_config<I, E>(mut config: Config, identity: I, extractor: E) -> Self
    where
        I: Fn(&T) -> Identity + Send + Sync + 'static,
        E: FacetExtractor<T> + 'static,
    {
        if let Err(err) = config.validate() {
            let fallback = Config::default().facet_warn_threshold;
            warn!(error = %err, fallback, "invalid config, using default facet_warn_threshold");
            config.facet_warn_threshold = fallback;
        }
        let rng: Box<dyn RngCore + Send> = match config.random_seed {
            Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
            None => Box::new(StdRng::from_entropy()),
        };

        Database {
            state: RwLock::new(IndexState::with_capacity(config.initial_capacity)),
            config,
            identity: Box::new(identity),
            extractor: Box::new(extractor),
            rng: Mutex::new(rng),
        }
    }

    /// Database whose facets come from the items' [`Structural`] fields.
    pub fn structural<I>(identity: I) -> Self
    where
        T: Structural,
        I: Fn(&T) -> Identity + Send + Sync + 'static,
    {
        Self::new(identity, StructuralExtractor)
    }

    /// Replace the random source used by [`search_random`](Database::search_random).
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        *self.rng.get_mut() = Box::new(rng);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Facets `item` would be posted under, without touching the index.
    pub fn facets_of(&self, item: &T) -> Vec<Facet> {
        self.extractor.extract(item)
    }

    fn prepare(&self, item: &T) -> Prepared {
        let identity = (self.identity)(item);
        let facets = self.extractor.extract(item);
        if facets.len() > self.config.facet_warn_threshold {
            warn!(
                identity = %identity,
                facets = facets.len(),
                threshold = self.config.facet_warn_threshold,
                "facet list above threshold, key fan-out is 2^n - 1"
            );
        }
        let keys = composite_keys(&facets);
        Prepared { identity, keys }
    }

    /// Store `item` and post its identity under every composite key of its
    /// facets. An existing record with the same identity is overwritten; its
    /// old postings are not retracted.
    pub fn insert(&self, item: T) {
        let entry = self.prepare(&item);
        self.state.write().apply_insert(entry, item);
    }

    /// Insert several items under one write-lock acquisition.
    pub fn insert_many<I: IntoIterator<Item = T>>(&self, items: I) {
        let prepared: Vec<(Prepared, T)> = items
            .into_iter()
            .map(|item| (self.prepare(&item), item))
            .collect();

        let mut state = self.state.write();
        for (entry, item) in prepared {
            state.apply_insert(entry, item);
        }
    }

    /// Remove the record with `item`'s identity and retract its postings from
    /// the keys computed from `item` as given. Returns whether a record was
    /// stored under that identity.
    pub fn delete(&self, item: &T) -> bool {
        let entry = self.prepare(item);
        self.state.write().apply_delete(&entry)
    }

    /// Delete then insert `item`, atomically with respect to readers.
    ///
    /// Both steps use the facets of `item` as passed. If the item was mutated
    /// in place beforehand, the delete computes keys from the new state and
    /// the postings of the old state stay behind.
    pub fn update(&self, item: T) {
        let entry = self.prepare(&item);
        let mut state = self.state.write();
        state.apply_delete(&entry);
        state.apply_insert(entry, item);
    }

    /// Items posted under `key`, in posting order. Unknown keys yield an empty
    /// result.
    pub fn search(&self, key: &str) -> Vec<T> {
        let state = self.state.read();
        QueryResolver::new(&state.index, &state.records).resolve(key)
    }

    /// Search for the key formed by joining `facets` in the given order.
    pub fn search_facets<F: AsRef<str>>(&self, facets: &[F]) -> Vec<T> {
        self.search(CompositeKey::from_facets(facets).as_str())
    }

    /// One item posted under `key`, picked uniformly over its posting list.
    ///
    /// `None` means the key has no postings, or the picked posting is dangling:
    /// its identity was deleted while a stale posting kept it listed here. The
    /// draw is not retried, so a key that still holds live identities can
    /// yield `None`.
    pub fn search_random(&self, key: &str) -> Option<T> {
        let state = self.state.read();
        let mut rng = self.rng.lock();
        QueryResolver::new(&state.index, &state.records).sample(key, &mut **rng)
    }

    /// Raw posting list of `key`. `None` if the key was never created,
    /// `Some` (possibly empty) otherwise.
    pub fn postings(&self, key: &str) -> Option<Vec<Identity>> {
        let state = self.state.read();
        state.index.get(key).map(|list| list.identities().to_vec())
    }

    /// Stored item for `identity`.
    pub fn get(&self, identity: &str) -> Option<T> {
        self.state.read().records.get(identity).cloned()
    }

    /// Number of live records.
    pub fn count(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Number of composite keys, including keys with empty posting lists.
    pub fn key_count(&self) -> usize {
        self.state.read().index.len()
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        let records = state.records.len();
        let keys = state.index.len();
        state.records.clear();
        state.index.clear();
        info!(records, keys, "cleared index");
    }

    pub fn stats(&self) -> IndexStats {
        let state = self.state.read();
        IndexStats {
            records: state.records.len(),
            composite_keys: state.index.len(),
            postings: state.index.posting_count(),
            distinct_identities: state.index.distinct_identities().len(),
        }
    }

    /// Consistent read-only copy of the composite index for diagnostics.
    pub fn snapshot(&self) -> IndexSnapshot {
        let state = self.state.read();
        IndexSnapshot::from_index(&state.index)
    }
}

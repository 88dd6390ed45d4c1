use serde::{Deserialize, Serialize};

/// Aggregate counters over the record store and composite index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Live records in the store.
    pub records: usize,
    /// Composite keys ever created, including ones whose posting list is now empty.
    pub composite_keys: usize,
    /// Total identities across all posting lists, duplicates included.
    pub postings: usize,
    /// Distinct identities referenced by any posting list.
    pub distinct_identities: usize,
}

use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::error::Result;
use crate::core::types::Identity;
use crate::index::composite::CompositeIndex;

/// One composite key as seen by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySnapshot {
    /// Facets joined into the key.
    pub member_count: usize,
    /// Posting list, in order.
    pub identities: Vec<Identity>,
}

/// Copy of the composite index taken under a single read lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub taken_at: DateTime<Utc>,
    pub keys: BTreeMap<String, KeySnapshot>,
    pub distinct_keys: usize,
    /// Distinct identities across all posting lists.
    pub distinct_identities: usize,
}

impl IndexSnapshot {
    pub fn from_index(index: &CompositeIndex) -> Self {
        let keys: BTreeMap<String, KeySnapshot> = index
            .iter()
            .map(|(key, list)| {
                let entry = KeySnapshot {
                    member_count: list.member_count(),
                    identities: list.identities().to_vec(),
                };
                (key.clone(), entry)
            })
            .collect();

        IndexSnapshot {
            taken_at: Utc::now(),
            distinct_keys: keys.len(),
            distinct_identities: index.distinct_identities().len(),
            keys,
        }
    }

    /// Keys grouped by member count, both levels and keys in ascending order.
    pub fn levels(&self) -> BTreeMap<usize, Vec<&str>> {
        let mut levels: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
        for (key, entry) in &self.keys {
            levels.entry(entry.member_count).or_default().push(key.as_str());
        }
        levels
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::combination::composite_keys;
    use crate::facet::facet::Facet;

    fn snapshot() -> IndexSnapshot {
        let mut index = CompositeIndex::new();
        let facets = vec![Facet::raw("color:Red"), Facet::raw("size:S")];
        index.add("r1", &composite_keys(&facets));
        index.add("r2", &composite_keys(&facets[..1]));
        IndexSnapshot::from_index(&index)
    }

    #[test]
    fn test_counts_and_entries() {
        let snap = snapshot();
        assert_eq!(snap.distinct_keys, 3);
        assert_eq!(snap.distinct_identities, 2);
        assert_eq!(
            snap.keys["color:Red"],
            KeySnapshot {
                member_count: 1,
                identities: vec!["r1".to_string(), "r2".to_string()],
            }
        );
    }

    #[test]
    fn test_levels_group_by_member_count() {
        let snap = snapshot();
        let levels = snap.levels();
        assert_eq!(levels[&1], vec!["color:Red", "size:S"]);
        assert_eq!(levels[&2], vec!["color:Red:size:S"]);
    }

    #[test]
    fn test_json_round_trip() {
        let snap = snapshot();
        let parsed = IndexSnapshot::from_json(&snap.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snap);
    }
}

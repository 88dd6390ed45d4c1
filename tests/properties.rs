use facetdb::facet::combination::composite_keys;
use facetdb::{CompositeKey, Database, Facet};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Record {
    id: String,
    facets: Vec<Facet>,
}

fn database() -> Database<Record> {
    Database::new(|r: &Record| r.id.clone(), |r: &Record| r.facets.clone())
}

// Distinct names keep every subset's text distinct.
fn arb_facets() -> impl Strategy<Value = Vec<Facet>> {
    prop::collection::btree_map("[a-z]{1,6}", "[A-Za-z0-9]{1,6}", 1..7).prop_map(|map| {
        map.into_iter()
            .map(|(name, value)| Facet::new(&name, &value))
            .collect()
    })
}

fn arb_record() -> impl Strategy<Value = Record> {
    ("[a-z0-9]{1,8}", arb_facets()).prop_map(|(id, facets)| Record { id, facets })
}

proptest! {
    #[test]
    fn insert_posts_under_every_subset(record in arb_record()) {
        let db = database();
        db.insert(record.clone());

        let n = record.facets.len();
        prop_assert_eq!(db.key_count(), (1usize << n) - 1);
        for key in composite_keys(&record.facets) {
            prop_assert_eq!(db.postings(key.as_str()), Some(vec![record.id.clone()]));
        }
    }

    #[test]
    fn full_key_search_finds_record(record in arb_record()) {
        let db = database();
        db.insert(record.clone());

        let key = CompositeKey::from_facets(&record.facets);
        let found = db.search(key.as_str());
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(&found[0].id, &record.id);
    }

    #[test]
    fn delete_with_same_state_retracts_everything(record in arb_record()) {
        let db = database();
        db.insert(record.clone());
        prop_assert!(db.delete(&record));

        prop_assert_eq!(db.count(), 0);
        for key in composite_keys(&record.facets) {
            prop_assert!(db.search(key.as_str()).is_empty());
        }
    }

    #[test]
    fn delete_of_never_inserted_is_noop(stored in arb_record(), other in arb_record()) {
        prop_assume!(stored.id != other.id);
        let db = database();
        db.insert(stored.clone());
        let before = db.snapshot();

        prop_assert!(!db.delete(&other));
        prop_assert_eq!(db.snapshot().keys, before.keys);
        prop_assert_eq!(db.count(), 1);
    }

    #[test]
    fn reversed_key_does_not_match(record in arb_record()) {
        prop_assume!(record.facets.len() >= 2);
        let db = database();
        db.insert(record.clone());

        let mut reversed = record.facets.clone();
        reversed.reverse();
        prop_assert!(db.search_facets(&reversed).is_empty());
    }
}

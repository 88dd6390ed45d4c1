pub mod core;
pub mod facet;
pub mod index;
pub mod search;
pub mod diagnostics;

pub use crate::core::config::Config;
pub use crate::core::database::Database;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::IndexStats;
pub use crate::core::types::Identity;
pub use crate::facet::{CompositeKey, Facet, FacetExtractor, StructuralExtractor, Structural};

/*
┌──────────────────────────────────────────────────────────────────────────────┐
│                            FACETDB ARCHITECTURE                              │
└──────────────────────────────────────────────────────────────────────────────┘

  insert(item) / delete(&item) / update(item)
        │
        ▼
  ┌───────────────────────────┐      ┌──────────────────────────────────────┐
  │ identity: Fn(&T) -> String│      │ extractor: FacetExtractor<T>         │
  └─────────────┬─────────────┘      │   closure (manual)                   │
                │                    │   StructuralExtractor (structural!)  │
                │                    └──────────────────┬───────────────────┘
                │                                       │ Vec<Facet>  [a, b, c]
                │                                       ▼
                │                    ┌──────────────────────────────────────┐
                │                    │ combinations(): 2^n - 1 keys         │
                │                    │   a  b  a:b  c  a:c  b:c  a:b:c      │
                │                    └──────────────────┬───────────────────┘
                ▼                                       ▼
  ┌──────────────────────────── RwLock<IndexState<T>> ─────────────────────────┐
  │  RecordStore<T>   identity -> item                                         │
  │  CompositeIndex   key -> PostingList [identity, ...]                       │
  └────────────────────────────────────┬───────────────────────────────────────┘
                                       │ read lock
              ┌────────────────────────┼──────────────────────────┐
              ▼                        ▼                          ▼
   QueryResolver::resolve   QueryResolver::sample (rng)   IndexSnapshot -> DotRenderer
     search(key)              search_random(key)            snapshot()
*/

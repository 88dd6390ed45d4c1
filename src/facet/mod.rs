//! Facet extraction and composite-key generation.
//!
//! A facet is a `name:value` token. An extractor turns an item into an ordered
//! facet list, and the combination generator expands that list into every
//! non-empty ordered subset joined with [`DELIMITER`].

pub mod facet;
pub mod extractor;
pub mod structural;
pub mod combination;

pub use combination::{combinations, composite_keys, Combinations, CompositeKey};
pub use extractor::{FacetExtractor, StructuralExtractor};
pub use facet::{Facet, DELIMITER};
pub use structural::{FacetField, FacetValue, FacetVisitor, Structural};

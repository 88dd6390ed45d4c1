use crate::facet::facet::Facet;
use crate::facet::structural::Structural;

/// Turns an item into its ordered facet list.
///
/// Called once per insert, delete and update, so it must be pure: the same
/// item state has to yield the same list or deletes will miss postings.
///
/// Any `Fn(&T) -> Vec<Facet>` closure is an extractor; that is the manual
/// variant. [`StructuralExtractor`] is the automatic one.
pub trait FacetExtractor<T>: Send + Sync {
    fn extract(&self, item: &T) -> Vec<Facet>;
}

impl<T, F> FacetExtractor<T> for F
where
    F: Fn(&T) -> Vec<Facet> + Send + Sync,
{
    fn extract(&self, item: &T) -> Vec<Facet> {
        self(item)
    }
}

/// Derives facets from a [`Structural`] item's tagged fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralExtractor;

impl<T: Structural> FacetExtractor<T> for StructuralExtractor {
    fn extract(&self, item: &T) -> Vec<Facet> {
        item.facets()
    }
}

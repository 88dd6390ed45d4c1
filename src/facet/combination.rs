use std::fmt;
use std::iter::FusedIterator;
use crate::facet::facet::{Facet, DELIMITER};

/// Longest facet list the generator accepts. Subsets are enumerated as `u64`
/// bitmasks; long before this limit the 2^n - 1 keys stop fitting in memory.
pub const MAX_FACETS: usize = 63;

/// Delimiter-joined, order-preserving subset of a facet list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    text: String,
    member_count: usize,
}

impl CompositeKey {
    /// Key made of every facet, in the given order. This is the exact text to
    /// pass to a search for a record with these facets.
    pub fn from_facets<F: AsRef<str>>(facets: &[F]) -> Self {
        let mut text = String::new();
        for (i, facet) in facets.iter().enumerate() {
            if i > 0 {
                text.push(DELIMITER);
            }
            text.push_str(facet.as_ref());
        }
        CompositeKey {
            text,
            member_count: facets.len(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of facets joined into this key.
    pub fn member_count(&self) -> usize {
        self.member_count
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CompositeKey {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Iterator over the 2^n - 1 composite keys of a facet list, one per non-empty
/// bitmask in increasing mask order. Members keep their original relative
/// order regardless of mask order.
pub struct Combinations<'a> {
    facets: &'a [Facet],
    mask: u64,
    last: u64,
}

impl<'a> Combinations<'a> {
    /// # Panics
    ///
    /// Panics if `facets` has more than [`MAX_FACETS`] members.
    pub fn new(facets: &'a [Facet]) -> Self {
        assert!(
            facets.len() <= MAX_FACETS,
            "facet list of {} members exceeds the {} member limit",
            facets.len(),
            MAX_FACETS
        );
        Combinations {
            facets,
            mask: 1,
            last: (1u64 << facets.len()) - 1,
        }
    }

    fn key_for(&self, mask: u64) -> CompositeKey {
        let mut text = String::new();
        let mut member_count = 0;
        for (j, facet) in self.facets.iter().enumerate() {
            if mask & (1u64 << j) == 0 {
                continue;
            }
            if member_count > 0 {
                text.push(DELIMITER);
            }
            text.push_str(facet.as_str());
            member_count += 1;
        }
        CompositeKey { text, member_count }
    }
}

impl Iterator for Combinations<'_> {
    type Item = CompositeKey;

    fn next(&mut self) -> Option<CompositeKey> {
        if self.mask > self.last {
            return None;
        }
        let key = self.key_for(self.mask);
        self.mask += 1;
        Some(key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.mask) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl FusedIterator for Combinations<'_> {}

/// Lazily enumerate every composite key of `facets`.
///
/// Cost is exponential: a list of n facets yields 2^n - 1 keys.
pub fn combinations(facets: &[Facet]) -> Combinations<'_> {
    Combinations::new(facets)
}

/// Collect every composite key of `facets`.
pub fn composite_keys(facets: &[Facet]) -> Vec<CompositeKey> {
    combinations(facets).collect()
}

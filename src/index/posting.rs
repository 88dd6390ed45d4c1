use crate::core::types::Identity;

/// Identities attached to one composite key, in insertion order.
///
/// Appends are not deduplicated: inserting the same record twice without a
/// delete in between lists its identity twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    member_count: usize,
    identities: Vec<Identity>,
}

impl PostingList {
    pub fn new(member_count: usize) -> Self {
        PostingList {
            member_count,
            identities: Vec::new(),
        }
    }

    /// Facets making up the key this list belongs to.
    pub fn member_count(&self) -> usize {
        self.member_count
    }

    pub fn push(&mut self, identity: Identity) {
        self.identities.push(identity);
    }

    /// Drop every occurrence of `identity`. Returns how many were removed.
    pub fn remove_all(&mut self, identity: &str) -> usize {
        let before = self.identities.len();
        self.identities.retain(|id| id != identity);
        before - self.identities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.identities.iter()
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_order_and_duplicates() {
        let mut list = PostingList::new(2);
        list.push("a".to_string());
        list.push("b".to_string());
        list.push("a".to_string());

        assert_eq!(list.identities(), ["a", "b", "a"]);
        assert_eq!(list.member_count(), 2);
    }

    #[test]
    fn test_remove_all_occurrences() {
        let mut list = PostingList::new(1);
        for id in ["a", "b", "a", "c"] {
            list.push(id.to_string());
        }

        assert_eq!(list.remove_all("a"), 2);
        assert_eq!(list.identities(), ["b", "c"]);
        assert_eq!(list.remove_all("missing"), 0);
        assert!(list.iter().all(|id| id != "a"));
    }
}

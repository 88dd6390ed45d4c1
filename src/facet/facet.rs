use std::fmt;
use serde::{Deserialize, Serialize};
use crate::facet::structural::FacetValue;

/// Separator between a facet's name and value, and between facets of a composite key.
pub const DELIMITER: char = ':';

/// One `name:value` attribute token.
///
/// Values must not contain [`DELIMITER`]. This is not checked: a value with a
/// delimiter in it produces keys that collide with other facet lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Facet(String);

impl Facet {
    pub fn new<V: FacetValue + ?Sized>(name: &str, value: &V) -> Self {
        let value = value.canonical();
        let mut text = String::with_capacity(name.len() + 1 + value.len());
        text.push_str(name);
        text.push(DELIMITER);
        text.push_str(&value);
        Facet(text)
    }

    /// Wrap an already formatted `name:value` token.
    pub fn raw(text: impl Into<String>) -> Self {
        Facet(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn name(&self) -> &str {
        self.0.split_once(DELIMITER).map_or(self.0.as_str(), |(name, _)| name)
    }

    pub fn value(&self) -> &str {
        self.0.split_once(DELIMITER).map_or("", |(_, value)| value)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Facet {
    fn from(text: String) -> Self {
        Facet(text)
    }
}

impl From<&str> for Facet {
    fn from(text: &str) -> Self {
        Facet(text.to_string())
    }
}

impl AsRef<str> for Facet {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

//! Structural (automatic) facet extraction.
//!
//! A type opts in by implementing [`Structural`], normally through the
//! [`structural!`](crate::structural) macro, which takes the type's field
//! descriptors in declaration order:
//!
//! ```
//! use facetdb::structural;
//!
//! struct Engine { kind: String, horsepower: u32 }
//! struct Car { model: String, serial: u64, engine: Engine }
//!
//! structural!(Engine { kind: "type", horsepower: "horsepower" });
//! structural!(Car { model: "model", serial, engine });
//!
//! let car = Car {
//!     model: "ModelS".into(),
//!     serial: 99,
//!     engine: Engine { kind: "V8".into(), horsepower: 400 },
//! };
//! let facets: Vec<String> = facetdb::facet::Structural::facets(&car)
//!     .into_iter()
//!     .map(|f| f.into_string())
//!     .collect();
//! assert_eq!(facets, ["model:ModelS", "type:V8", "horsepower:400"]);
//! ```
//!
//! A descriptor `field: "tag"` marks an indexable leaf; a bare `field` is
//! untagged. Composite fields are recursed into whether tagged or not, and
//! untagged leaves emit nothing. Traversal is depth-first, pre-order.

use crate::facet::facet::{Facet, DELIMITER};

/// Canonical string form of a leaf value.
///
/// Strings pass through, booleans render `true`/`false`, integers render in
/// base 10 and floats use the shortest representation that round-trips.
/// An empty rendering means "no facet".
pub trait FacetValue {
    fn canonical(&self) -> String;
}

impl FacetValue for str {
    fn canonical(&self) -> String {
        self.to_string()
    }
}

impl FacetValue for String {
    fn canonical(&self) -> String {
        self.clone()
    }
}

impl<V: FacetValue + ?Sized> FacetValue for &V {
    fn canonical(&self) -> String {
        (**self).canonical()
    }
}

impl<V: FacetValue> FacetValue for Option<V> {
    fn canonical(&self) -> String {
        match self {
            Some(value) => value.canonical(),
            None => String::new(),
        }
    }
}

// `Display` for these is already canonical: base-10 integers without
// separators, shortest round-trip floats without exponent.
macro_rules! display_values {
    ($($t:ty),* $(,)?) => {
        $(
            impl FacetValue for $t {
                fn canonical(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_values!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Collects facets during a structural traversal.
#[derive(Debug, Default)]
pub struct FacetVisitor {
    facets: Vec<Facet>,
}

impl FacetVisitor {
    pub fn new() -> Self {
        FacetVisitor { facets: Vec::new() }
    }

    /// Emit `name:value` unless the canonical value is empty.
    pub fn leaf<V: FacetValue + ?Sized>(&mut self, name: &str, value: &V) {
        let value = value.canonical();
        if value.is_empty() {
            return;
        }
        self.facets.push(Facet::raw(format!("{}{}{}", name, DELIMITER, value)));
    }

    pub fn into_facets(self) -> Vec<Facet> {
        self.facets
    }
}

/// A record whose indexable fields can be walked.
pub trait Structural {
    fn visit_facets(&self, visitor: &mut FacetVisitor);

    fn facets(&self) -> Vec<Facet> {
        let mut visitor = FacetVisitor::new();
        self.visit_facets(&mut visitor);
        visitor.into_facets()
    }
}

impl<S: Structural + ?Sized> Structural for Box<S> {
    fn visit_facets(&self, visitor: &mut FacetVisitor) {
        (**self).visit_facets(visitor);
    }
}

/// How a field of a [`Structural`] type takes part in traversal.
///
/// `tag` is `Some` when the field is marked indexable. Leaf types emit a facet
/// only when tagged; composite types recurse and ignore the tag.
pub trait FacetField {
    fn visit_field(&self, tag: Option<&str>, visitor: &mut FacetVisitor);
}

macro_rules! leaf_fields {
    ($($t:ty),* $(,)?) => {
        $(
            impl FacetField for $t {
                fn visit_field(&self, tag: Option<&str>, visitor: &mut FacetVisitor) {
                    if let Some(tag) = tag {
                        visitor.leaf(tag, self);
                    }
                }
            }
        )*
    };
}

leaf_fields!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<V: FacetValue> FacetField for Option<V> {
    fn visit_field(&self, tag: Option<&str>, visitor: &mut FacetVisitor) {
        if let Some(tag) = tag {
            visitor.leaf(tag, self);
        }
    }
}

// Sequences have no canonical scalar form.
impl<V> FacetField for Vec<V> {
    fn visit_field(&self, _tag: Option<&str>, _visitor: &mut FacetVisitor) {}
}

impl<F: FacetField + ?Sized> FacetField for &F {
    fn visit_field(&self, tag: Option<&str>, visitor: &mut FacetVisitor) {
        (**self).visit_field(tag, visitor);
    }
}

impl<F: FacetField + ?Sized> FacetField for Box<F> {
    fn visit_field(&self, tag: Option<&str>, visitor: &mut FacetVisitor) {
        (**self).visit_field(tag, visitor);
    }
}

/// Implement [`Structural`] and [`FacetField`] for a struct from its field
/// descriptors, listed in declaration order.
///
/// `field: "tag"` marks an indexable field, a bare `field` is untagged.
/// Every listed field's type must implement [`FacetField`]; leave out fields
/// that should never be visited.
#[macro_export]
macro_rules! structural {
    ($ty:ty { $($field:ident $(: $tag:literal)?),* $(,)? }) => {
        impl $crate::facet::Structural for $ty {
            fn visit_facets(&self, visitor: &mut $crate::facet::FacetVisitor) {
                let _ = &visitor;
                $(
                    $crate::facet::FacetField::visit_field(
                        &self.$field,
                        ::core::option::Option::<&str>::None
                            $(.or(::core::option::Option::Some($tag)))?,
                        visitor,
                    );
                )*
            }
        }

        impl $crate::facet::FacetField for $ty {
            fn visit_field(
                &self,
                _tag: ::core::option::Option<&str>,
                visitor: &mut $crate::facet::FacetVisitor,
            ) {
                $crate::facet::Structural::visit_facets(self, visitor);
            }
        }
    };
}

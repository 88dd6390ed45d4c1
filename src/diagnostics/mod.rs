//! Read-only views of the composite index for inspection and visualisation.
//! Nothing here affects search results.

pub mod snapshot;
pub mod dot;

pub use dot::DotRenderer;
pub use snapshot::{IndexSnapshot, KeySnapshot};

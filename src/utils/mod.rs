//! Shared infrastructure
//!
//! - [`index`]: typed handles and the [`IndexVec`] they subscript
//! - [`bounding_box`]: axis-aligned boxes used by mesh and scene queries

pub mod bounding_box;
pub mod index;

pub use bounding_box::BoundingBox;
pub use index::{Idx, IndexVec};

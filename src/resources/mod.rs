//! Scene resources
//!
//! Data the scene graph refers to but does not interpret structurally:
//! - Mesh: geometry, point attributes, mesh features and codec settings
//! - Material: materials, texture bindings and material variants
//! - Texture: texture payloads with stable identities
//! - Metadata: key/value metadata and structural metadata
//! - Splitter: breaking a mesh into per-material parts

pub mod material;
pub mod mesh;
pub mod metadata;
pub mod splitter;
pub mod texture;

pub use material::{Material, MaterialLibrary, TextureMap, TextureMapKind};
pub use mesh::{AttributeKind, CompressionOptions, Mesh, MeshFeatures, PointAttribute};
pub use metadata::{Metadata, MetadataValue, PropertyTable, StructuralMetadata};
pub use splitter::{MaterialSplitter, MeshSplitter};
pub use texture::{Texture, TextureLibrary};

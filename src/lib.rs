#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

//! Format-independent scene graph for compressed 3D assets.
//!
//! A [`Scene`] owns base meshes, mesh groups, DAG nodes, animations, skins,
//! lights and material libraries, all addressed by typed indices.
//! [`scene_utils`] holds the algorithms that keep it consistent across
//! edits: instance flattening, cleanup, deduplication and mesh conversion.

pub mod animation;
pub mod errors;
pub mod resources;
pub mod scene;
pub mod scene_utils;
pub mod utils;

pub use animation::{Animation, AnimationChannel, AnimationSampler, InterpolationMode, TargetPath};
pub use errors::{Result, SceneError};
pub use resources::{
    AttributeKind, CompressionOptions, Material, MaterialLibrary, Mesh, MeshFeatures,
    PointAttribute, Texture, TextureLibrary, TextureMap, TextureMapKind,
};
pub use scene::{
    AnimationIndex, InstanceArray, InstanceArrayIndex, Light, LightIndex, LightKind,
    MaterialsVariantsMapping, MeshGroup, MeshGroupIndex, MeshIndex, MeshInstanceIndex, Scene,
    SceneNode, SceneNodeIndex, Skin, SkinIndex, TrsMatrix,
};
pub use scene_utils::CleanupOptions;
pub use utils::{BoundingBox, Idx, IndexVec};

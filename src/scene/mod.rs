//! Scene graph
//!
//! Owns the entities of an asset and the references between them:
//! - Scene: the aggregate owning every entity in index-addressed sequences
//! - SceneNode: a DAG node with a local transform and optional attachments
//! - MeshGroup: ordered (mesh, material) bindings shared by nodes
//! - TrsMatrix: a node's local transform
//! - Skin, Light, InstanceArray: node attachments

pub mod instance_array;
pub mod light;
pub mod mesh_group;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod skin;
pub mod transform;

pub use instance_array::InstanceArray;
pub use light::{Light, LightKind, SpotLight};
pub use mesh_group::{MaterialsVariantsMapping, MeshGroup, MeshInstance};
pub use node::SceneNode;
pub use scene::Scene;
pub use skin::Skin;
pub use transform::TrsMatrix;

use crate::define_index;

define_index! {
    /// Base mesh in [`Scene`].
    pub struct MeshIndex;
    /// Mesh group in [`Scene`].
    pub struct MeshGroupIndex;
    /// Node in [`Scene`].
    pub struct SceneNodeIndex;
    pub struct AnimationIndex;
    pub struct SkinIndex;
    pub struct LightIndex;
    pub struct InstanceArrayIndex;
    /// Position in a flattened instance list; never stored in a scene.
    pub struct MeshInstanceIndex;
}

//! Stateless algorithms over a [`Scene`](crate::scene::Scene)
//!
//! - [`instances`]: DAG flattening, transforms, bounds and counts
//! - [`cleanup`]: reachability-based removal of unused entities
//! - [`dedup`]: mesh group deduplication and instance removal
//! - [`convert`]: wrapping a mesh into a scene
//! - [`compression`]: scene-wide compression settings
//! - [`info`]: input/simplified statistics report

pub mod cleanup;
pub mod compression;
pub mod convert;
pub mod dedup;
pub mod info;
pub mod instances;

pub use cleanup::{CleanupOptions, cleanup};
pub use compression::{is_compression_enabled, set_compression_options};
pub use convert::{mesh_to_scene, mesh_to_scene_with};
pub use dedup::{deduplicate_mesh_groups, remove_mesh_instances};
pub use info::{format_info, print_info};
pub use instances::{
    MeshInstance, compute_all_instances, compute_bounding_box, compute_global_node_transform,
    compute_mesh_instance_bounding_box, find_largest_base_mesh_transforms, instantiate_mesh,
    mesh_instance_material_index, num_att_entries_on_base_meshes,
    num_att_entries_on_instanced_meshes, num_faces_on_base_meshes, num_faces_on_instanced_meshes,
    num_mesh_instances, num_points_on_base_meshes, num_points_on_instanced_meshes,
};

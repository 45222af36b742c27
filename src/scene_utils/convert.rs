//! Mesh to scene conversion.

use crate::errors::{Result, SceneError};
use crate::resources::mesh::shift_past_removed;
use crate::resources::{AttributeKind, MaterialSplitter, Mesh, MeshSplitter};
use crate::scene::{MeshGroup, MeshInstance, Scene};

/// Wraps a single mesh into a new scene with one root node.
///
/// See [`mesh_to_scene_with`]; parts are produced by [`MaterialSplitter`].
pub fn mesh_to_scene(mesh: Mesh) -> Result<Scene> {
    mesh_to_scene_with(mesh, &MaterialSplitter)
}

/// Wraps a single mesh into a new scene with one root node and one mesh
/// group.
///
/// The mesh's materials move to the scene library; a mesh without materials
/// gets a default material 0. A mesh with more than one material is split
/// by its material attribute, each non-empty part becoming a base mesh with
/// one instance bound to its material and carrying the mesh features that
/// apply to that material. Feature textures are copied to the scene's
/// non-material texture library and rebound to the copies.
pub fn mesh_to_scene_with(mut mesh: Mesh, splitter: &impl MeshSplitter) -> Result<Scene> {
    let mut scene = Scene::new();
    let num_mesh_materials = mesh.material_library().num_materials();
    if num_mesh_materials > 0 {
        scene.material_library_mut().copy_from(mesh.material_library());
        mesh.material_library_mut().clear();
    } else {
        scene.material_library_mut().mutable_material(0);
    }

    scene
        .non_material_texture_library_mut()
        .copy_from(mesh.non_material_texture_library());
    let old_texture_to_index = mesh.non_material_texture_library().compute_texture_to_index_map();

    let node_index = scene.create_node();
    let mut group = MeshGroup::new();

    if num_mesh_materials <= 1 {
        mesh.update_mesh_features_texture_pointers(
            &old_texture_to_index,
            scene.non_material_texture_library(),
        );
        mesh.non_material_texture_library_mut().clear();
        let mesh_index = scene.add_mesh(mesh);
        group.add_mesh_instance(MeshInstance::new(mesh_index, Some(0)));
    } else {
        let material_att_id = mesh
            .named_attribute_id(AttributeKind::Material)
            .ok_or(SceneError::MissingAttribute(AttributeKind::Material.name()))?;
        let material_att = mesh.attribute(material_att_id).ok_or_else(|| {
            SceneError::Internal(format!("material attribute {material_att_id} vanished"))
        })?;

        let parts = splitter.split_mesh(&mesh, material_att_id)?;
        for (value, part) in parts.into_iter().enumerate() {
            let Some(mut part) = part else {
                log::warn!("Material value {value} has no geometry, skipping");
                continue;
            };
            let material_index = material_att.value_as_index(value).unwrap_or(0);

            part.copy_mesh_features_for_material(&mesh, material_index);
            for i in 0..part.num_mesh_features() {
                if let Some(features) = part.mesh_features_mut(i) {
                    features.attribute_index =
                        shift_past_removed(features.attribute_index, material_att_id);
                }
            }
            part.update_mesh_features_texture_pointers(
                &old_texture_to_index,
                scene.non_material_texture_library(),
            );

            let mesh_index = scene.add_mesh(part);
            group.add_mesh_instance(MeshInstance::new(mesh_index, Some(material_index)));
        }
    }

    let group_index = scene.add_mesh_group(group);
    if let Some(node) = scene.get_node_mut(node_index) {
        node.set_mesh_group_index(group_index);
    }
    scene.add_root_node(node_index);
    Ok(scene)
}

//! Flattening the scene DAG into positioned mesh instances, and the queries
//! derived from it.

use glam::DMat4;

use crate::errors::{Result, SceneError};
use crate::resources::{AttributeKind, Mesh};
use crate::scene::{MeshIndex, MeshInstanceIndex, Scene, SceneNodeIndex};
use crate::utils::{BoundingBox, IndexVec};

/// A base mesh placed in the world by one path through the scene DAG.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshInstance {
    pub mesh_index: MeshIndex,
    pub scene_node_index: SceneNodeIndex,
    /// Position of the instance within the node's mesh group.
    pub mesh_group_mesh_index: usize,
    /// Mesh-to-world transform accumulated along the path.
    pub transform: DMat4,
}

/// Every (mesh, node, transform) triple reachable from the root nodes.
///
/// Depth-first from each root in order, children in order, group instances
/// in order. A node reachable through several parents is emitted once per
/// path, each time with that path's transform. Placeholder instances are
/// skipped.
#[must_use]
pub fn compute_all_instances(scene: &Scene) -> IndexVec<MeshInstanceIndex, MeshInstance> {
    let mut instances = IndexVec::new();
    let mut stack: Vec<(SceneNodeIndex, DMat4)> = scene
        .root_node_indices()
        .iter()
        .rev()
        .map(|&root| (root, DMat4::IDENTITY))
        .collect();

    while let Some((node_index, parent_transform)) = stack.pop() {
        let Some(node) = scene.get_node(node_index) else {
            log::warn!("Skipping missing node {node_index}");
            continue;
        };
        let combined = parent_transform * node.trs_matrix().compute_transformation_matrix();

        if let Some(group) = scene.get_mesh_group(node.mesh_group_index()) {
            for (i, instance) in group.mesh_instances().iter().enumerate() {
                if instance.mesh_index.is_valid() {
                    instances.push(MeshInstance {
                        mesh_index: instance.mesh_index,
                        scene_node_index: node_index,
                        mesh_group_mesh_index: i,
                        transform: combined,
                    });
                }
            }
        }

        stack.extend(node.children().iter().rev().map(|&child| (child, combined)));
    }
    instances
}

/// Transform of `node_index` obtained by walking up through single parents.
///
/// The walk stops at the first node that has no parent or more than one;
/// that node's own local transform is still included. Use
/// [`compute_all_instances`] for transforms through shared nodes.
#[must_use]
pub fn compute_global_node_transform(scene: &Scene, node_index: SceneNodeIndex) -> DMat4 {
    let mut transform = DMat4::IDENTITY;
    let mut current = node_index;
    while let Some(node) = scene.get_node(current) {
        transform = node.trs_matrix().compute_transformation_matrix() * transform;
        current = match node.parents() {
            [parent] => *parent,
            _ => SceneNodeIndex::INVALID,
        };
    }
    transform
}

/// Number of flattened instances of each base mesh.
#[must_use]
pub fn num_mesh_instances(scene: &Scene) -> IndexVec<MeshIndex, usize> {
    let mut counts = IndexVec::from_elem(0, scene.num_meshes());
    for instance in &compute_all_instances(scene) {
        if let Some(count) = counts.get_mut(instance.mesh_index) {
            *count += 1;
        }
    }
    counts
}

/// Material bound to a flattened instance, `None` if it has none or the
/// instance no longer resolves.
#[must_use]
pub fn mesh_instance_material_index(scene: &Scene, instance: &MeshInstance) -> Option<usize> {
    let node = scene.get_node(instance.scene_node_index)?;
    let group = scene.get_mesh_group(node.mesh_group_index())?;
    group
        .mesh_instance(instance.mesh_group_mesh_index)?
        .material_index
}

// ============================================================================
// Counting
// ============================================================================

fn sum_over_base_meshes(scene: &Scene, count: impl Fn(&Mesh) -> usize) -> usize {
    scene.meshes().iter().map(count).sum()
}

fn sum_over_instances(scene: &Scene, count: impl Fn(&Mesh) -> usize) -> usize {
    compute_all_instances(scene)
        .iter()
        .filter_map(|instance| scene.get_mesh(instance.mesh_index))
        .map(count)
        .sum()
}

fn num_att_entries(mesh: &Mesh, kind: AttributeKind) -> usize {
    (0..mesh.num_named_attributes(kind))
        .filter_map(|n| mesh.named_attribute_id_nth(kind, n))
        .filter_map(|id| mesh.attribute(id))
        .map(|att| att.size())
        .sum()
}

#[must_use]
pub fn num_faces_on_base_meshes(scene: &Scene) -> usize {
    sum_over_base_meshes(scene, Mesh::num_faces)
}

#[must_use]
pub fn num_faces_on_instanced_meshes(scene: &Scene) -> usize {
    sum_over_instances(scene, Mesh::num_faces)
}

#[must_use]
pub fn num_points_on_base_meshes(scene: &Scene) -> usize {
    sum_over_base_meshes(scene, Mesh::num_points)
}

#[must_use]
pub fn num_points_on_instanced_meshes(scene: &Scene) -> usize {
    sum_over_instances(scene, Mesh::num_points)
}

/// Unique values across every `kind` attribute of every base mesh.
#[must_use]
pub fn num_att_entries_on_base_meshes(scene: &Scene, kind: AttributeKind) -> usize {
    sum_over_base_meshes(scene, |mesh| num_att_entries(mesh, kind))
}

#[must_use]
pub fn num_att_entries_on_instanced_meshes(scene: &Scene, kind: AttributeKind) -> usize {
    sum_over_instances(scene, |mesh| num_att_entries(mesh, kind))
}

// ============================================================================
// Bounds and transforms
// ============================================================================

/// World-space bounds of one flattened instance, computed from every
/// position value of its base mesh. Empty when the mesh has no positions.
#[must_use]
pub fn compute_mesh_instance_bounding_box(scene: &Scene, instance: &MeshInstance) -> BoundingBox {
    let mut bbox = BoundingBox::empty();
    let Some(positions) = scene
        .get_mesh(instance.mesh_index)
        .and_then(|mesh| mesh.named_attribute(AttributeKind::Position))
    else {
        return bbox;
    };
    for i in 0..positions.size() {
        if let Some(p) = positions.value_vec3(i) {
            let p = instance.transform.transform_point3(p.as_dvec3());
            bbox.update(p.as_vec3());
        }
    }
    bbox
}

/// Union of the bounds of every flattened instance.
#[must_use]
pub fn compute_bounding_box(scene: &Scene) -> BoundingBox {
    compute_all_instances(scene)
        .iter()
        .map(|instance| compute_mesh_instance_bounding_box(scene, instance))
        .fold(BoundingBox::empty(), |acc, b| acc.union(&b))
}

/// For each base mesh, the transform of its instance with the largest
/// scale (largest basis column length). Identity for meshes without
/// instances; the first of equally scaled instances wins.
#[must_use]
pub fn find_largest_base_mesh_transforms(scene: &Scene) -> IndexVec<MeshIndex, DMat4> {
    let mut transforms = IndexVec::from_elem(DMat4::IDENTITY, scene.num_meshes());
    let mut scales: IndexVec<MeshIndex, f64> = IndexVec::from_elem(0.0, scene.num_meshes());
    for instance in &compute_all_instances(scene) {
        let m = &instance.transform;
        let scale = (0..3).map(|c| m.col(c).length()).fold(0.0, f64::max);
        if let Some(best) = scales.get_mut(instance.mesh_index)
            && *best < scale
        {
            *best = scale;
            transforms[instance.mesh_index] = instance.transform;
        }
    }
    transforms
}

/// Standalone copy of an instance's base mesh, baked into world space.
///
/// Fails when the base mesh is missing, has no positions, or its positions
/// are not three-component.
pub fn instantiate_mesh(scene: &Scene, instance: &MeshInstance) -> Result<Mesh> {
    let mesh = scene
        .get_mesh(instance.mesh_index)
        .ok_or(SceneError::MissingMesh(instance.mesh_index))?;
    let positions = mesh
        .named_attribute(AttributeKind::Position)
        .ok_or(SceneError::MissingAttribute(AttributeKind::Position.name()))?;
    if positions.num_components() != 3 {
        return Err(SceneError::InvalidAttribute(format!(
            "positions have {} components, expected 3",
            positions.num_components()
        )));
    }

    let mut copy = mesh.clone();
    if instance.transform != DMat4::IDENTITY {
        copy.transform(&instance.transform);
    }
    Ok(copy)
}

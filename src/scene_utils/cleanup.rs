//! Reachability-based removal of unused scene entities.
//!
//! The passes run in a fixed order and each one sees the state left by the
//! previous one: instances, then meshes, then mesh groups, then texture
//! coordinates, then materials, then nodes.

use bitflags::bitflags;
use rustc_hash::FxHashSet;

use crate::resources::AttributeKind;
use crate::scene::{MeshGroupIndex, MeshIndex, Scene, SceneNodeIndex};
use crate::utils::IndexVec;

bitflags! {
    /// Selects the passes run by [`cleanup`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CleanupOptions: u32 {
        /// Drop placeholder instances whose mesh is `INVALID`.
        const REMOVE_INVALID_MESH_INSTANCES = 1 << 0;
        /// Drop base meshes no referenced mesh group instantiates.
        const REMOVE_UNUSED_MESHES          = 1 << 1;
        /// Drop mesh groups that are empty or not used by any node.
        const REMOVE_UNUSED_MESH_GROUPS     = 1 << 2;
        /// Drop materials no mesh instance is bound to.
        const REMOVE_UNUSED_MATERIALS       = 1 << 3;
        /// Drop texture coordinate sets no texture map samples.
        const REMOVE_UNUSED_TEX_COORDS      = 1 << 4;
        /// Drop nodes that carry nothing and lead to nothing.
        const REMOVE_UNUSED_NODES           = 1 << 5;
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::REMOVE_INVALID_MESH_INSTANCES
            | Self::REMOVE_UNUSED_MESHES
            | Self::REMOVE_UNUSED_MESH_GROUPS
            | Self::REMOVE_UNUSED_MATERIALS
    }
}

/// Removes unused entities from `scene` according to `options`.
///
/// Running it twice with the same options leaves the scene unchanged the
/// second time.
pub fn cleanup(scene: &mut Scene, options: CleanupOptions) {
    if options.contains(CleanupOptions::REMOVE_INVALID_MESH_INSTANCES) {
        for group in scene.mesh_groups_mut().iter_mut() {
            group.remove_mesh_instances(MeshIndex::INVALID);
        }
    }

    // Mesh groups used by nodes.
    let num_groups = scene.num_mesh_groups();
    let mut is_group_referenced = vec![false; num_groups];
    for node in scene.nodes() {
        if let Some(flag) = slot(&mut is_group_referenced, node.mesh_group_index().value()) {
            *flag = true;
        }
    }

    // Base meshes used by referenced groups, and referenced groups without
    // any instance.
    let mut is_mesh_referenced = vec![false; scene.num_meshes()];
    let mut is_group_empty = vec![false; num_groups];
    for (mgi, group) in scene.mesh_groups().iter_enumerated() {
        if !is_group_referenced[mgi.value()] {
            continue;
        }
        is_group_empty[mgi.value()] = group.num_mesh_instances() == 0;
        for instance in group.mesh_instances() {
            if instance.mesh_index.is_valid()
                && let Some(flag) = slot(&mut is_mesh_referenced, instance.mesh_index.value())
            {
                *flag = true;
            }
        }
    }

    if options.contains(CleanupOptions::REMOVE_UNUSED_MESHES) {
        let mut removed = 0;
        for mi in scene.meshes().indices().rev() {
            if !is_mesh_referenced[mi.value()] && scene.remove_mesh(mi).is_ok() {
                removed += 1;
            }
        }
        if removed > 0 {
            log::debug!("Cleanup removed {removed} unused meshes");
        }
    }

    if options.contains(CleanupOptions::REMOVE_UNUSED_MESH_GROUPS) {
        let mut removed = 0;
        for mgi in scene.mesh_groups().indices().rev() {
            let i = mgi.value();
            if (is_group_empty[i] || !is_group_referenced[i])
                && scene.remove_mesh_group(mgi).is_ok()
            {
                removed += 1;
            }
        }
        if removed > 0 {
            log::debug!("Cleanup removed {removed} unused mesh groups");
        }
    }

    let usage = MaterialUsage::collect(scene);

    if options.contains(CleanupOptions::REMOVE_UNUSED_TEX_COORDS) {
        remove_unused_tex_coords(scene, &usage);
    }

    if options.contains(CleanupOptions::REMOVE_UNUSED_MATERIALS) {
        let mut removed = 0;
        for material in (0..usage.material_meshes.len()).rev() {
            if !usage.material_meshes[material].is_empty() {
                continue;
            }
            match scene.remove_material(material) {
                Ok(()) => removed += 1,
                Err(err) => log::error!("Cleanup could not remove material {material}: {err}"),
            }
        }
        if removed > 0 {
            log::debug!("Cleanup removed {removed} unused materials");
        }
    }

    if options.contains(CleanupOptions::REMOVE_UNUSED_NODES) {
        remove_unused_nodes(scene);
    }
}

#[inline]
fn slot(flags: &mut [bool], index: usize) -> Option<&mut bool> {
    flags.get_mut(index)
}

// ============================================================================
// Materials and texture coordinates
// ============================================================================

/// Which meshes use which materials, over every instance of every mesh group.
struct MaterialUsage {
    material_meshes: Vec<FxHashSet<MeshIndex>>,
    mesh_materials: IndexVec<MeshIndex, FxHashSet<usize>>,
    /// Texture coordinate sets sampled by each mesh's materials.
    tex_coord_referenced: IndexVec<MeshIndex, FxHashSet<usize>>,
}

impl MaterialUsage {
    fn collect(scene: &Scene) -> Self {
        let library = scene.material_library();
        let mut usage = Self {
            material_meshes: vec![FxHashSet::default(); library.num_materials()],
            mesh_materials: IndexVec::from_elem(FxHashSet::default(), scene.num_meshes()),
            tex_coord_referenced: IndexVec::from_elem(FxHashSet::default(), scene.num_meshes()),
        };

        for group in scene.mesh_groups() {
            for instance in group.mesh_instances() {
                let Some(material_index) = instance.material_index else {
                    continue;
                };
                let Some(material) = library.material(material_index) else {
                    log::warn!("Mesh instance refers to missing material {material_index}");
                    continue;
                };
                usage.material_meshes[material_index].insert(instance.mesh_index);

                let mi = instance.mesh_index;
                if let Some(materials) = usage.mesh_materials.get_mut(mi) {
                    materials.insert(material_index);
                }
                if let Some(tex_coords) = usage.tex_coord_referenced.get_mut(mi) {
                    tex_coords.extend(material.texture_maps().iter().map(|t| t.tex_coord_index));
                }
            }
        }
        usage
    }

    /// `true` when every material of `mesh` is used by `mesh` alone.
    fn owns_all_materials(&self, mesh: MeshIndex) -> bool {
        self.mesh_materials[mesh]
            .iter()
            .all(|&m| self.material_meshes[m].len() == 1)
    }
}

fn remove_unused_tex_coords(scene: &mut Scene, usage: &MaterialUsage) {
    for mi in scene.meshes().indices() {
        // Materials shared with another mesh also describe that mesh's UVs.
        if !usage.owns_all_materials(mi) {
            continue;
        }
        let referenced = &usage.tex_coord_referenced[mi];
        let tex_coord_count = scene.meshes()[mi].num_named_attributes(AttributeKind::TexCoord);
        for tci in (0..tex_coord_count).rev() {
            if referenced.contains(&tci) {
                continue;
            }
            let mesh = &mut scene.meshes_mut()[mi];
            if let Some(id) = mesh.named_attribute_id_nth(AttributeKind::TexCoord, tci) {
                mesh.delete_attribute(id);
            }

            for &material_index in &usage.mesh_materials[mi] {
                let material = scene.material_library_mut().mutable_material(material_index);
                for texture_map in material.texture_maps_mut() {
                    if texture_map.tex_coord_index > tci {
                        texture_map.tex_coord_index -= 1;
                    }
                }
            }
            log::debug!("Cleanup removed tex coord set {tci} from mesh {mi}");
        }
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// Removes nodes without a mesh group that are neither referenced by an
/// animation or skin nor ancestors of a node that is kept, then renumbers
/// the survivors contiguously.
fn remove_unused_nodes(scene: &mut Scene) {
    let num_nodes = scene.num_nodes();
    let mut used: IndexVec<SceneNodeIndex, bool> = scene
        .nodes()
        .iter()
        .map(|node| node.mesh_group_index().is_valid())
        .collect();

    let mut force_use = |index: SceneNodeIndex, what: &str| match used.get_mut(index) {
        Some(flag) => *flag = true,
        None if index.is_valid() => log::warn!("Ignoring {what} reference to missing node {index}"),
        None => {}
    };
    for animation in scene.animations() {
        for channel in animation.channels() {
            force_use(channel.target_index, "animation channel");
        }
    }
    for skin in scene.skins() {
        for &joint in skin.joints() {
            force_use(joint, "skin joint");
        }
        force_use(skin.joint_root(), "skin joint root");
    }

    propagate_usage_to_ancestors(scene, &mut used);

    let mut node_map: IndexVec<SceneNodeIndex, SceneNodeIndex> =
        IndexVec::from_elem(SceneNodeIndex::INVALID, num_nodes);
    let mut num_used = 0;
    for (sni, &is_used) in used.iter_enumerated() {
        if is_used {
            node_map[sni] = SceneNodeIndex::new(num_used);
            num_used += 1;
        }
    }
    if num_used == num_nodes {
        return;
    }

    let remap = |index: SceneNodeIndex| {
        node_map
            .get(index)
            .copied()
            .unwrap_or(SceneNodeIndex::INVALID)
    };

    for node in scene.nodes_mut().iter_mut() {
        let children = node
            .children
            .iter()
            .map(|&c| remap(c))
            .filter(|c| c.is_valid())
            .collect();
        node.children = children;
        let parents = node
            .parents
            .iter()
            .map(|&p| remap(p))
            .filter(|p| p.is_valid())
            .collect();
        node.parents = parents;
    }
    scene.root_node_indices_mut().retain_mut(|root| {
        *root = remap(*root);
        root.is_valid()
    });
    for animation in scene.animations_mut().iter_mut() {
        for channel in animation.channels_mut() {
            channel.target_index = remap(channel.target_index);
        }
    }
    for skin in scene.skins_mut().iter_mut() {
        for joint in skin.joints_mut() {
            *joint = remap(*joint);
        }
        let root = remap(skin.joint_root());
        skin.set_joint_root(root);
    }

    // Compact: survivors only ever move to lower slots.
    let nodes = scene.nodes_mut();
    for old in nodes.indices() {
        let new = node_map[old];
        if new.is_valid() && new != old {
            let node = std::mem::take(&mut nodes[old]);
            nodes[new] = node;
        }
    }
    scene.resize_nodes(num_used);
    log::debug!("Cleanup removed {} unused nodes", num_nodes - num_used);
}

/// Marks every ancestor of a used node as used, walking down from the roots.
///
/// Iterative post-order so deep hierarchies cannot overflow the stack.
fn propagate_usage_to_ancestors(scene: &Scene, used: &mut IndexVec<SceneNodeIndex, bool>) {
    let mut visited: IndexVec<SceneNodeIndex, bool> =
        IndexVec::from_elem(false, scene.num_nodes());
    // (node, children already pushed)
    let mut stack: Vec<(SceneNodeIndex, bool)> = scene
        .root_node_indices()
        .iter()
        .rev()
        .map(|&r| (r, false))
        .collect();

    while let Some((sni, expanded)) = stack.pop() {
        let Some(node) = scene.get_node(sni) else {
            continue;
        };
        if expanded {
            if node.children().iter().any(|&c| used.get(c).copied().unwrap_or(false)) {
                used[sni] = true;
            }
            continue;
        }
        if visited[sni] {
            continue;
        }
        visited[sni] = true;
        stack.push((sni, true));
        stack.extend(node.children().iter().rev().map(|&c| (c, false)));
    }
}

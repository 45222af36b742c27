//! Structural deduplication of mesh groups.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use xxhash_rust::xxh3::Xxh3;

use crate::errors::{Result, SceneError};
use crate::scene::{MeshGroup, MeshGroupIndex, Scene, SceneNode};
use crate::scene_utils::cleanup::{CleanupOptions, cleanup};
use crate::scene_utils::instances::MeshInstance;
use crate::utils::IndexVec;

const SIGNATURE_SEED: u64 = 79;

/// Hash of everything group equality looks at: name, and every instance's
/// mesh, material and variant mappings, in order.
fn signature(group: &MeshGroup) -> u64 {
    let mut hasher = Xxh3::with_seed(SIGNATURE_SEED);
    group.hash(&mut hasher);
    hasher.finish()
}

/// Repoints nodes from each mesh group to the first structurally equal group
/// and removes the now unused duplicates with a default [`cleanup`].
///
/// Groups whose instances differ only in order are not duplicates.
pub fn deduplicate_mesh_groups(scene: &mut Scene) {
    if scene.num_mesh_groups() <= 1 {
        return;
    }

    let groups = scene.mesh_groups();
    let mut first_seen: FxHashMap<u64, SmallVec<[MeshGroupIndex; 2]>> = FxHashMap::default();
    let mut canonical: IndexVec<MeshGroupIndex, MeshGroupIndex> = groups.indices().collect();
    for (mgi, group) in groups.iter_enumerated() {
        let candidates = first_seen.entry(signature(group)).or_default();
        match candidates.iter().find(|&&seen| groups[seen] == *group) {
            Some(&seen) => canonical[mgi] = seen,
            None => candidates.push(mgi),
        }
    }

    let mut repointed = 0;
    for node in scene.nodes_mut().iter_mut() {
        if let Some(&target) = canonical.get(node.mesh_group_index())
            && target != node.mesh_group_index()
        {
            node.set_mesh_group_index(target);
            repointed += 1;
        }
    }
    log::debug!("Mesh group deduplication repointed {repointed} nodes");

    cleanup(scene, CleanupOptions::default());
}

/// Removes the given flattened instances from the scene.
///
/// The owning mesh group may be shared, so it is left untouched: the node
/// gets a copy of it without the instance's mesh. Equal copies are merged
/// and orphaned groups removed afterwards via [`deduplicate_mesh_groups`].
///
/// Fails on the first instance whose node or mesh group no longer exists;
/// instances processed before it stay removed.
pub fn remove_mesh_instances(instances: &[MeshInstance], scene: &mut Scene) -> Result<()> {
    for instance in instances {
        let mgi = scene
            .get_node(instance.scene_node_index)
            .map(SceneNode::mesh_group_index)
            .ok_or(SceneError::IndexOutOfRange {
                context: "scene node",
                index: instance.scene_node_index.value(),
            })?;
        let mut group = scene
            .get_mesh_group(mgi)
            .cloned()
            .ok_or(SceneError::MissingMeshGroup(mgi))?;
        group.remove_mesh_instances(instance.mesh_index);
        let new_mgi = scene.add_mesh_group(group);
        if let Some(node) = scene.get_node_mut(instance.scene_node_index) {
            node.set_mesh_group_index(new_mgi);
        }
    }
    deduplicate_mesh_groups(scene);
    Ok(())
}

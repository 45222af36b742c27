//! Mesh Group Deduplication Integration Tests
//!
//! Tests for:
//! - deduplicate_mesh_groups: merging, order sensitivity, names
//! - remove_mesh_instances on shared and unshared groups

mod common;

use common::{add_materials, add_root_with_group, group, quad, triangle};
use mesh_scene::scene_utils::{
    compute_all_instances, deduplicate_mesh_groups, num_mesh_instances, remove_mesh_instances,
};
use mesh_scene::{MeshGroupIndex, MeshIndex, Scene, SceneError, SceneNodeIndex};

fn node_group(scene: &Scene, node: SceneNodeIndex) -> MeshGroupIndex {
    scene.get_node(node).unwrap().mesh_group_index()
}

/// Two meshes and three root nodes: nodes 0 and 1 use equal groups, node 2
/// uses the same instances in the opposite order.
fn duplicated_scene() -> (Scene, [SceneNodeIndex; 3]) {
    let mut scene = Scene::new();
    scene.add_mesh(triangle());
    scene.add_mesh(quad());
    add_materials(&mut scene, 2);
    let g0 = scene.add_mesh_group(group(&[(0, Some(0)), (1, Some(1))]));
    let g1 = scene.add_mesh_group(group(&[(0, Some(0)), (1, Some(1))]));
    let g2 = scene.add_mesh_group(group(&[(1, Some(1)), (0, Some(0))]));
    let nodes = [
        add_root_with_group(&mut scene, g0),
        add_root_with_group(&mut scene, g1),
        add_root_with_group(&mut scene, g2),
    ];
    (scene, nodes)
}

// ============================================================================
// deduplicate_mesh_groups
// ============================================================================

#[test]
fn dedup_merges_equal_groups_only() {
    common::init_logger();
    let (mut scene, [n0, n1, n2]) = duplicated_scene();
    deduplicate_mesh_groups(&mut scene);

    assert_eq!(scene.num_mesh_groups(), 2);
    assert_eq!(node_group(&scene, n0), MeshGroupIndex::new(0));
    assert_eq!(node_group(&scene, n1), MeshGroupIndex::new(0));
    assert_eq!(node_group(&scene, n2), MeshGroupIndex::new(1));

    let first = scene.mesh_groups()[MeshGroupIndex::new(1)].mesh_instances()[0].mesh_index;
    assert_eq!(first, MeshIndex::new(1));
}

#[test]
fn dedup_preserves_flattened_instances() {
    let (mut scene, _) = duplicated_scene();
    let before: Vec<_> = compute_all_instances(&scene)
        .iter()
        .map(|i| (i.mesh_index, i.scene_node_index))
        .collect();
    deduplicate_mesh_groups(&mut scene);
    let after: Vec<_> = compute_all_instances(&scene)
        .iter()
        .map(|i| (i.mesh_index, i.scene_node_index))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn dedup_distinguishes_names() {
    let (mut scene, _) = duplicated_scene();
    scene
        .get_mesh_group_mut(MeshGroupIndex::new(1))
        .unwrap()
        .set_name("lod1");
    deduplicate_mesh_groups(&mut scene);
    assert_eq!(scene.num_mesh_groups(), 3);
}

#[test]
fn dedup_distinguishes_materials() {
    let (mut scene, _) = duplicated_scene();
    scene
        .get_mesh_group_mut(MeshGroupIndex::new(1))
        .unwrap()
        .mesh_instance_mut(0)
        .unwrap()
        .material_index = Some(1);
    deduplicate_mesh_groups(&mut scene);
    assert_eq!(scene.num_mesh_groups(), 3);
}

#[test]
fn dedup_of_single_group_is_noop() {
    let mut scene = common::two_mesh_scene();
    let before = scene.clone();
    deduplicate_mesh_groups(&mut scene);
    assert_eq!(scene.mesh_groups(), before.mesh_groups());
    assert_eq!(scene.nodes(), before.nodes());
}

#[test]
fn dedup_is_idempotent() {
    let (mut scene, _) = duplicated_scene();
    deduplicate_mesh_groups(&mut scene);
    let once = scene.clone();
    deduplicate_mesh_groups(&mut scene);
    assert_eq!(scene.mesh_groups(), once.mesh_groups());
    assert_eq!(scene.nodes(), once.nodes());
}

// ============================================================================
// remove_mesh_instances
// ============================================================================

/// Two root nodes sharing one group with meshes 0 and 1, no materials.
fn shared_group_scene() -> (Scene, [SceneNodeIndex; 2]) {
    let mut scene = Scene::new();
    scene.add_mesh(triangle());
    scene.add_mesh(quad());
    let mgi = scene.add_mesh_group(group(&[(0, None), (1, None)]));
    let nodes = [
        add_root_with_group(&mut scene, mgi),
        add_root_with_group(&mut scene, mgi),
    ];
    (scene, nodes)
}

#[test]
fn remove_instance_from_shared_group_leaves_other_node() {
    let (mut scene, [n0, n1]) = shared_group_scene();
    let target: Vec<_> = compute_all_instances(&scene)
        .iter()
        .filter(|i| i.scene_node_index == n1 && i.mesh_index == MeshIndex::new(1))
        .copied()
        .collect();
    assert_eq!(target.len(), 1);

    remove_mesh_instances(&target, &mut scene).unwrap();

    assert_eq!(scene.num_mesh_groups(), 2);
    let g0 = &scene.mesh_groups()[node_group(&scene, n0)];
    let g1 = &scene.mesh_groups()[node_group(&scene, n1)];
    assert_eq!(g0.num_mesh_instances(), 2);
    assert_eq!(g1.num_mesh_instances(), 1);
    assert_eq!(g1.mesh_instances()[0].mesh_index, MeshIndex::new(0));
    assert_eq!(compute_all_instances(&scene).len(), 3);
}

#[test]
fn remove_instances_from_every_node_merges_and_cleans_up() {
    let (mut scene, [n0, n1]) = shared_group_scene();
    let targets: Vec<_> = compute_all_instances(&scene)
        .iter()
        .filter(|i| i.mesh_index == MeshIndex::new(1))
        .copied()
        .collect();
    assert_eq!(targets.len(), 2);

    remove_mesh_instances(&targets, &mut scene).unwrap();

    assert_eq!(scene.num_mesh_groups(), 1);
    assert_eq!(scene.num_meshes(), 1);
    assert_eq!(node_group(&scene, n0), MeshGroupIndex::new(0));
    assert_eq!(node_group(&scene, n1), MeshGroupIndex::new(0));
    assert_eq!(num_mesh_instances(&scene).as_slice(), &[2]);
}

#[test]
fn remove_instances_with_empty_list_still_deduplicates() {
    let (mut scene, _) = duplicated_scene();
    remove_mesh_instances(&[], &mut scene).unwrap();
    assert_eq!(scene.num_mesh_groups(), 2);
}

#[test]
fn remove_instance_of_detached_node_fails() {
    let (mut scene, [_, n1]) = shared_group_scene();
    let instances: Vec<_> = compute_all_instances(&scene).iter().copied().collect();
    scene
        .get_node_mut(n1)
        .unwrap()
        .set_mesh_group_index(MeshGroupIndex::new(9));

    let err = remove_mesh_instances(&instances, &mut scene).unwrap_err();
    assert_eq!(err, SceneError::MissingMeshGroup(MeshGroupIndex::new(9)));
}

#[test]
fn remove_instance_of_missing_node_fails() {
    let (mut scene, _) = shared_group_scene();
    let mut instance = compute_all_instances(&scene).iter().next().copied().unwrap();
    instance.scene_node_index = SceneNodeIndex::new(5);

    let err = remove_mesh_instances(&[instance], &mut scene).unwrap_err();
    assert!(matches!(err, SceneError::IndexOutOfRange { index: 5, .. }));
}

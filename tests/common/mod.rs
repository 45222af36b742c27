//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use glam::{DMat4, DVec3, Vec3};
use mesh_scene::scene::MeshInstance;
use mesh_scene::{
    Material, Mesh, MeshGroup, MeshGroupIndex, MeshIndex, Scene, SceneNodeIndex, TrsMatrix,
};

pub const EPSILON: f64 = 1e-9;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn approx_mat(a: &DMat4, b: &DMat4) -> bool {
    a.abs_diff_eq(*b, EPSILON)
}

/// Unit right triangle in the XY plane.
pub fn triangle() -> Mesh {
    Mesh::with_positions(&[Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]])
}

/// Two triangles sharing an edge.
pub fn quad() -> Mesh {
    Mesh::with_positions(
        &[Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

pub fn translation(x: f64, y: f64, z: f64) -> TrsMatrix {
    TrsMatrix::from_translation(DVec3::new(x, y, z))
}

/// Group with one instance per `(mesh, material)` pair.
pub fn group(instances: &[(usize, Option<usize>)]) -> MeshGroup {
    let mut group = MeshGroup::new();
    for &(mesh, material) in instances {
        group.add_mesh_instance(MeshInstance::new(MeshIndex::new(mesh), material));
    }
    group
}

/// Adds `n` materials named `m0`, `m1`, ...
pub fn add_materials(scene: &mut Scene, n: usize) {
    for i in 0..n {
        scene.material_library_mut().add_material(Material::new(format!("m{i}")));
    }
}

/// Creates a root node showing `group`.
pub fn add_root_with_group(scene: &mut Scene, group: MeshGroupIndex) -> SceneNodeIndex {
    let node = scene.create_node();
    scene
        .get_node_mut(node)
        .expect("node just created")
        .set_mesh_group_index(group);
    scene.add_root_node(node);
    node
}

/// Two meshes, two materials, one group (mesh 0 with material 0, mesh 1
/// with material 1) on a single root node.
pub fn two_mesh_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_mesh(triangle());
    scene.add_mesh(quad());
    add_materials(&mut scene, 2);
    let mgi = scene.add_mesh_group(group(&[(0, Some(0)), (1, Some(1))]));
    add_root_with_group(&mut scene, mgi);
    scene
}

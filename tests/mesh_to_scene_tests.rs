//! Mesh To Scene Integration Tests
//!
//! Tests for:
//! - Single-material and material-less meshes
//! - Splitting by material attribute, skipped empty materials
//! - Mesh features filtering and texture rebinding

mod common;

use common::triangle;
use glam::Vec3;
use mesh_scene::scene_utils::{compute_all_instances, mesh_instance_material_index, mesh_to_scene};
use mesh_scene::{
    AttributeKind, CompressionOptions, Material, Mesh, MeshFeatures, MeshGroupIndex, MeshIndex,
    PointAttribute, SceneError, Texture, TextureMap, TextureMapKind,
};

/// Two triangles with their own points. Material rows are `[0, 2, 1]`; the
/// first face uses row 0, the second row 1, row 2 is unused.
fn two_material_mesh() -> Mesh {
    let mut mesh = Mesh::with_positions(
        &[
            Vec3::ZERO,
            Vec3::X,
            Vec3::Y,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    );
    mesh.add_attribute(PointAttribute::with_point_map(
        AttributeKind::Material,
        1,
        vec![0.0, 2.0, 1.0],
        vec![0, 0, 0, 1, 1, 1],
    ));
    mesh.add_attribute(PointAttribute::new(
        AttributeKind::Generic,
        1,
        vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0],
    ));
    for name in ["red", "green", "blue"] {
        mesh.material_library_mut().add_material(Material::new(name));
    }
    mesh
}

// ============================================================================
// Single part
// ============================================================================

#[test]
fn mesh_without_materials_gets_default_material() -> anyhow::Result<()> {
    let scene = mesh_to_scene(triangle())?;

    assert_eq!(scene.num_meshes(), 1);
    assert_eq!(scene.num_mesh_groups(), 1);
    assert_eq!(scene.num_nodes(), 1);
    assert_eq!(scene.num_root_nodes(), 1);
    assert_eq!(scene.material_library().num_materials(), 1);

    let instances = compute_all_instances(&scene);
    assert_eq!(instances.len(), 1);
    let instance = instances.iter().next().unwrap();
    assert_eq!(mesh_instance_material_index(&scene, instance), Some(0));
    Ok(())
}

#[test]
fn single_material_moves_to_scene_library() -> anyhow::Result<()> {
    let mut mesh = triangle();
    mesh.material_library_mut().add_material(Material::new("only"));
    let scene = mesh_to_scene(mesh)?;

    assert_eq!(scene.material_library().num_materials(), 1);
    assert_eq!(scene.material_library().material(0).unwrap().name, "only");
    let base = scene.get_mesh(MeshIndex::new(0)).unwrap();
    assert_eq!(base.material_library().num_materials(), 0);
    assert_eq!(base.num_faces(), 1);
    Ok(())
}

#[test]
fn single_material_rebinds_feature_textures() -> anyhow::Result<()> {
    let mut mesh = triangle();
    let texture = Texture::new("ids");
    let original = texture.uuid;
    mesh.non_material_texture_library_mut().push_texture(texture);
    mesh.add_mesh_features(MeshFeatures {
        label: "buildings".into(),
        feature_count: 4,
        texture_map: Some(TextureMap::new(TextureMapKind::Generic, 0, Some(original))),
        ..MeshFeatures::default()
    });

    let scene = mesh_to_scene(mesh)?;

    let scene_texture = scene.non_material_texture_library().texture(0).unwrap();
    assert_ne!(scene_texture.uuid, original);
    let base = scene.get_mesh(MeshIndex::new(0)).unwrap();
    assert_eq!(base.non_material_texture_library().num_textures(), 0);
    let bound = base.mesh_features(0).unwrap().texture_map.as_ref().unwrap().texture;
    assert_eq!(bound, Some(scene_texture.uuid));
    Ok(())
}

// ============================================================================
// Split by material
// ============================================================================

#[test]
fn multi_material_mesh_is_split_per_used_material() -> anyhow::Result<()> {
    common::init_logger();
    let scene = mesh_to_scene(two_material_mesh())?;

    assert_eq!(scene.material_library().num_materials(), 3);
    assert_eq!(scene.num_meshes(), 2);
    let materials: Vec<_> = scene.mesh_groups()[MeshGroupIndex::new(0)]
        .mesh_instances()
        .iter()
        .map(|i| (i.mesh_index.value(), i.material_index))
        .collect();
    assert_eq!(materials, vec![(0, Some(0)), (1, Some(2))]);

    for mesh in scene.meshes() {
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_points(), 3);
        assert!(mesh.named_attribute(AttributeKind::Material).is_none());
        assert_eq!(mesh.material_library().num_materials(), 0);
    }

    let second = scene.get_mesh(MeshIndex::new(1)).unwrap();
    let positions = second.named_attribute(AttributeKind::Position).unwrap();
    assert_eq!(positions.value_vec3(0), Some(Vec3::new(2.0, 0.0, 0.0)));
    let ids = second.named_attribute(AttributeKind::Generic).unwrap();
    assert_eq!(ids.value(2), Some(&[15.0][..]));
    Ok(())
}

#[test]
fn split_parts_keep_total_geometry() -> anyhow::Result<()> {
    let mesh = two_material_mesh();
    let faces = mesh.num_faces();
    let scene = mesh_to_scene(mesh)?;
    let total: usize = scene.meshes().iter().map(Mesh::num_faces).sum();
    assert_eq!(total, faces);
    Ok(())
}

#[test]
fn split_parts_carry_features_for_their_material() -> anyhow::Result<()> {
    let mut mesh = two_material_mesh();
    let texture = Texture::new("feature ids");
    let original = texture.uuid;
    mesh.non_material_texture_library_mut().push_texture(texture);

    mesh.add_mesh_features(MeshFeatures {
        label: "per-vertex".into(),
        attribute_index: Some(2),
        ..MeshFeatures::default()
    });
    let textured = mesh.add_mesh_features(MeshFeatures {
        label: "per-texel".into(),
        texture_channels: vec![0],
        texture_map: Some(TextureMap::new(TextureMapKind::Generic, 0, Some(original))),
        ..MeshFeatures::default()
    });
    mesh.add_mesh_features_material_mask(textured, 2);

    let scene = mesh_to_scene(mesh)?;
    let first = scene.get_mesh(MeshIndex::new(0)).unwrap();
    let second = scene.get_mesh(MeshIndex::new(1)).unwrap();

    assert_eq!(first.num_mesh_features(), 1);
    assert_eq!(first.mesh_features(0).unwrap().attribute_index, Some(1));
    assert_eq!(second.num_mesh_features(), 2);
    assert_eq!(second.mesh_features(0).unwrap().attribute_index, Some(1));

    let scene_uuid = scene.non_material_texture_library().texture(0).unwrap().uuid;
    let bound = second.mesh_features(1).unwrap().texture_map.as_ref().unwrap().texture;
    assert_eq!(bound, Some(scene_uuid));
    assert_ne!(scene_uuid, original);
    Ok(())
}

#[test]
fn split_parts_keep_compression_settings() -> anyhow::Result<()> {
    let mut mesh = two_material_mesh();
    let options = CompressionOptions {
        quantization_position: 14,
        ..CompressionOptions::default()
    };
    mesh.set_compression_enabled(true);
    mesh.set_compression_options(options);

    let scene = mesh_to_scene(mesh)?;
    for mesh in scene.meshes() {
        assert!(mesh.is_compression_enabled());
        assert_eq!(*mesh.compression_options(), options);
    }
    Ok(())
}

#[test]
fn multi_material_mesh_requires_material_attribute() {
    let mut mesh = triangle();
    mesh.material_library_mut().add_material(Material::new("a"));
    mesh.material_library_mut().add_material(Material::new("b"));
    let err = mesh_to_scene(mesh).unwrap_err();
    assert!(matches!(err, SceneError::MissingAttribute(_)));
}

#[test]
fn mixed_material_face_is_rejected() {
    let mut mesh = two_material_mesh();
    mesh.add_face([0, 1, 3]);
    let err = mesh_to_scene(mesh).unwrap_err();
    assert!(matches!(err, SceneError::InvalidAttribute(_)));
}

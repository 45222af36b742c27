use rustc_hash::FxHashMap;

use crate::errors::{Result, SceneError};
use crate::resources::mesh::{Mesh, PointAttribute};

/// Splits a mesh into parts keyed by the values of one attribute.
pub trait MeshSplitter {
    /// Returns one entry per value row of attribute `attribute_id`.
    ///
    /// Entry `i` holds the geometry whose points use value row `i`, or `None`
    /// when no geometry uses it. The split attribute itself is not carried
    /// into the parts; attributes above it shift down by one id.
    fn split_mesh(&self, mesh: &Mesh, attribute_id: usize) -> Result<Vec<Option<Mesh>>>;
}

/// Default [`MeshSplitter`], used to break a mesh up by its material
/// attribute. Faces must use a single value on all three corners.
///
/// Points shared between faces of the same part stay shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialSplitter;

impl MeshSplitter for MaterialSplitter {
    fn split_mesh(&self, mesh: &Mesh, attribute_id: usize) -> Result<Vec<Option<Mesh>>> {
        let split = mesh
            .attribute(attribute_id)
            .ok_or(SceneError::IndexOutOfRange {
                context: "split attribute",
                index: attribute_id,
            })?;
        let num_parts = split.size();
        let mut part_faces: Vec<Vec<[u32; 3]>> = vec![Vec::new(); num_parts];
        let mut part_points: Vec<Vec<u32>> = vec![Vec::new(); num_parts];

        if mesh.num_faces() > 0 {
            for (fi, face) in mesh.faces().iter().enumerate() {
                let value = split.mapped_index(face[0] as usize);
                if face[1..]
                    .iter()
                    .any(|&p| split.mapped_index(p as usize) != value)
                {
                    return Err(SceneError::InvalidAttribute(format!(
                        "split attribute is not constant across face {fi}"
                    )));
                }
                let faces = part_faces.get_mut(value).ok_or_else(|| {
                    SceneError::InvalidAttribute(format!(
                        "face {fi} maps to missing value row {value}"
                    ))
                })?;
                faces.push(*face);
            }
        } else {
            for point in 0..mesh.num_points() {
                let value = split.mapped_index(point);
                let points = part_points.get_mut(value).ok_or_else(|| {
                    SceneError::InvalidAttribute(format!(
                        "point {point} maps to missing value row {value}"
                    ))
                })?;
                points.push(point as u32);
            }
        }

        let parts = part_faces
            .into_iter()
            .zip(part_points)
            .map(|(faces, points)| {
                if faces.is_empty() && points.is_empty() {
                    None
                } else {
                    Some(build_part(mesh, attribute_id, &faces, points))
                }
            })
            .collect();
        Ok(parts)
    }
}

/// Builds a part from either a face list or (for point clouds) a point list.
fn build_part(mesh: &Mesh, skip_attribute: usize, faces: &[[u32; 3]], points: Vec<u32>) -> Mesh {
    let mut old_points = points;
    let mut new_faces = Vec::with_capacity(faces.len());
    if !faces.is_empty() {
        let mut remap: FxHashMap<u32, u32> = FxHashMap::default();
        for face in faces {
            new_faces.push(face.map(|p| {
                *remap.entry(p).or_insert_with(|| {
                    old_points.push(p);
                    (old_points.len() - 1) as u32
                })
            }));
        }
    }

    let mut part = Mesh::new();
    part.name.clone_from(&mesh.name);
    part.set_num_points(old_points.len());
    for face in new_faces {
        part.add_face(face);
    }

    for id in (0..mesh.num_attributes()).filter(|&id| id != skip_attribute) {
        let Some(src) = mesh.attribute(id) else {
            continue;
        };
        let n = src.num_components();
        let mut values = Vec::with_capacity(old_points.len() * n);
        for &p in &old_points {
            match src.point_value(p as usize) {
                Some(v) => values.extend_from_slice(v),
                None => values.extend(std::iter::repeat_n(0.0, n)),
            }
        }
        part.add_attribute(PointAttribute::new(src.kind(), n, values));
    }

    part.set_compression_enabled(mesh.is_compression_enabled());
    part.set_compression_options(*mesh.compression_options());
    part
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::mesh::AttributeKind;
    use glam::Vec3;

    /// Two triangles with material values 0 and 2; value row 1 is unused.
    fn two_material_quad() -> Mesh {
        let mut mesh = Mesh::with_positions(
            &[Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::X, Vec3::ONE, Vec3::Y],
            vec![[0, 1, 2], [3, 4, 5]],
        );
        mesh.add_attribute(PointAttribute::with_point_map(
            AttributeKind::Material,
            1,
            vec![0.0, 1.0, 2.0],
            vec![0, 0, 0, 2, 2, 2],
        ));
        mesh
    }

    #[test]
    fn test_split_yields_one_part_per_value_row() {
        let mesh = two_material_quad();
        let mat = mesh.named_attribute_id(AttributeKind::Material).unwrap();
        let parts = MaterialSplitter.split_mesh(&mesh, mat).unwrap();

        assert_eq!(parts.len(), 3);
        assert!(parts[1].is_none());
        let first = parts[0].as_ref().unwrap();
        assert_eq!(first.num_faces(), 1);
        assert_eq!(first.num_points(), 3);
        assert!(first.named_attribute(AttributeKind::Material).is_none());
        assert_eq!(
            parts[2].as_ref().unwrap().compute_bounding_box().max,
            Vec3::ONE
        );
    }

    #[test]
    fn test_split_rejects_mixed_face() {
        let mut mesh = Mesh::with_positions(&[Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]);
        let mat = mesh.add_attribute(PointAttribute::new(
            AttributeKind::Material,
            1,
            vec![0.0, 1.0, 0.0],
        ));
        assert!(matches!(
            MaterialSplitter.split_mesh(&mesh, mat),
            Err(SceneError::InvalidAttribute(_))
        ));
    }
}

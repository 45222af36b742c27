use glam::{DMat3, DMat4, DVec3, Vec3};
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::resources::material::{MaterialLibrary, TextureMap};
use crate::resources::texture::TextureLibrary;
use crate::utils::BoundingBox;

// ============================================================================
// Attributes
// ============================================================================

/// Semantic of a point attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Tangent,
    Color,
    TexCoord,
    Joints,
    Weights,
    /// Per-point material index into the mesh's material library.
    Material,
    Generic,
}

impl AttributeKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::Tangent => "tangent",
            AttributeKind::Color => "color",
            AttributeKind::TexCoord => "tex_coord",
            AttributeKind::Joints => "joints",
            AttributeKind::Weights => "weights",
            AttributeKind::Material => "material",
            AttributeKind::Generic => "generic",
        }
    }
}

/// A per-point attribute backed by a table of unique values.
///
/// Points map to value rows either one-to-one (the default) or through an
/// explicit point map, which lets many points share a single value such as a
/// material index.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAttribute {
    kind: AttributeKind,
    num_components: usize,
    values: Vec<f32>,
    point_map: Option<Vec<u32>>,
}

impl PointAttribute {
    /// Attribute whose `i`-th value belongs to the `i`-th point.
    ///
    /// `values.len()` must be a multiple of `num_components`.
    #[must_use]
    pub fn new(kind: AttributeKind, num_components: usize, values: Vec<f32>) -> Self {
        debug_assert!(num_components > 0 && values.len() % num_components == 0);
        Self {
            kind,
            num_components,
            values,
            point_map: None,
        }
    }

    /// Attribute with an explicit point-to-value map.
    #[must_use]
    pub fn with_point_map(
        kind: AttributeKind,
        num_components: usize,
        values: Vec<f32>,
        point_map: Vec<u32>,
    ) -> Self {
        Self {
            point_map: Some(point_map),
            ..Self::new(kind, num_components, values)
        }
    }

    #[must_use]
    pub fn from_vec3(kind: AttributeKind, values: &[Vec3]) -> Self {
        Self::new(kind, 3, values.iter().flat_map(|v| v.to_array()).collect())
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn num_components(&self) -> usize {
        self.num_components
    }

    /// Number of unique values stored.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.values.len() / self.num_components
    }

    #[inline]
    #[must_use]
    pub fn is_identity_mapped(&self) -> bool {
        self.point_map.is_none()
    }

    /// Row of the value used by `point`.
    #[inline]
    #[must_use]
    pub fn mapped_index(&self, point: usize) -> usize {
        match &self.point_map {
            Some(map) => map.get(point).map_or(usize::MAX, |&v| v as usize),
            None => point,
        }
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.num_components)?;
        self.values.get(start..start + self.num_components)
    }

    pub fn value_mut(&mut self, index: usize) -> Option<&mut [f32]> {
        let start = index.checked_mul(self.num_components)?;
        self.values.get_mut(start..start + self.num_components)
    }

    #[must_use]
    pub fn point_value(&self, point: usize) -> Option<&[f32]> {
        self.value(self.mapped_index(point))
    }

    /// First component of value row `index` read as a non-negative integer.
    #[must_use]
    pub fn value_as_index(&self, index: usize) -> Option<usize> {
        let v = *self.value(index)?.first()?;
        (v >= 0.0 && v.is_finite()).then_some(v as usize)
    }

    /// Value row `index` as a 3-vector; missing components read as zero.
    #[must_use]
    pub fn value_vec3(&self, index: usize) -> Option<Vec3> {
        let v = self.value(index)?;
        Some(Vec3::new(
            v[0],
            v.get(1).copied().unwrap_or(0.0),
            v.get(2).copied().unwrap_or(0.0),
        ))
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}

// ============================================================================
// Mesh features
// ============================================================================

/// A set of feature IDs attached to a mesh, stored either in an attribute or
/// in texture channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshFeatures {
    pub label: String,
    pub feature_count: u32,
    pub null_feature_id: Option<i32>,
    /// Attribute holding the feature IDs, when they are per-vertex.
    pub attribute_index: Option<usize>,
    pub property_table_index: Option<usize>,
    pub texture_channels: Vec<u8>,
    /// Texture holding the feature IDs, when they are per-texel.
    pub texture_map: Option<TextureMap>,
}

impl MeshFeatures {
    /// Rebinds the feature texture, see [`TextureMap::remap_texture`].
    pub fn remap_texture(&mut self, src_index: &FxHashMap<Uuid, usize>, dst: &TextureLibrary) {
        if let Some(texture_map) = &mut self.texture_map {
            texture_map.remap_texture(src_index, dst);
        }
    }
}

// ============================================================================
// Compression settings
// ============================================================================

/// Geometry codec settings stored per mesh. The codec itself lives elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionOptions {
    /// Speed/size trade-off, 0 (fastest) ..= 10 (smallest).
    pub compression_level: u32,
    pub quantization_position: u32,
    pub quantization_normal: u32,
    pub quantization_tex_coord: u32,
    pub quantization_color: u32,
    pub quantization_generic: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            compression_level: 7,
            quantization_position: 11,
            quantization_normal: 8,
            quantization_tex_coord: 10,
            quantization_color: 8,
            quantization_generic: 8,
        }
    }
}

// ============================================================================
// Mesh
// ============================================================================

/// Triangle mesh (or point cloud when it has no faces) in its own local space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub name: String,
    faces: Vec<[u32; 3]>,
    num_points: usize,
    attributes: Vec<PointAttribute>,

    material_library: MaterialLibrary,
    non_material_texture_library: TextureLibrary,

    mesh_features: Vec<MeshFeatures>,
    /// Parallel to `mesh_features`: materials each feature set is limited to.
    /// Empty means "all materials".
    mesh_features_material_masks: Vec<Vec<usize>>,

    compression_enabled: bool,
    compression_options: CompressionOptions,
}

impl Mesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mesh with one point per entry of `positions` and the given faces.
    #[must_use]
    pub fn with_positions(positions: &[Vec3], faces: Vec<[u32; 3]>) -> Self {
        let mut mesh = Self::new();
        mesh.set_num_points(positions.len());
        mesh.add_attribute(PointAttribute::from_vec3(AttributeKind::Position, positions));
        mesh.faces = faces;
        mesh
    }

    // === Connectivity ===

    #[inline]
    #[must_use]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    #[must_use]
    pub fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
    }

    #[inline]
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn set_num_points(&mut self, num_points: usize) {
        self.num_points = num_points;
    }

    // === Attributes ===

    #[inline]
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.attributes.len()
    }

    /// Adds `attribute` and returns its id.
    pub fn add_attribute(&mut self, attribute: PointAttribute) -> usize {
        self.attributes.push(attribute);
        self.attributes.len() - 1
    }

    #[must_use]
    pub fn attribute(&self, id: usize) -> Option<&PointAttribute> {
        self.attributes.get(id)
    }

    pub fn attribute_mut(&mut self, id: usize) -> Option<&mut PointAttribute> {
        self.attributes.get_mut(id)
    }

    /// Removes attribute `id`; ids above it shift down by one, feature sets
    /// included. Feature sets stored in the removed attribute lose it.
    pub fn delete_attribute(&mut self, id: usize) -> Option<PointAttribute> {
        if id >= self.attributes.len() {
            return None;
        }
        for features in &mut self.mesh_features {
            features.attribute_index = shift_past_removed(features.attribute_index, id);
        }
        Some(self.attributes.remove(id))
    }

    #[must_use]
    pub fn num_named_attributes(&self, kind: AttributeKind) -> usize {
        self.attributes.iter().filter(|a| a.kind == kind).count()
    }

    /// Id of the `n`-th attribute of `kind`.
    #[must_use]
    pub fn named_attribute_id_nth(&self, kind: AttributeKind, n: usize) -> Option<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind == kind)
            .nth(n)
            .map(|(id, _)| id)
    }

    #[must_use]
    pub fn named_attribute_id(&self, kind: AttributeKind) -> Option<usize> {
        self.named_attribute_id_nth(kind, 0)
    }

    #[must_use]
    pub fn named_attribute(&self, kind: AttributeKind) -> Option<&PointAttribute> {
        self.named_attribute_id(kind).and_then(|id| self.attribute(id))
    }

    // === Libraries ===

    pub fn material_library(&self) -> &MaterialLibrary {
        &self.material_library
    }

    pub fn material_library_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.material_library
    }

    pub fn non_material_texture_library(&self) -> &TextureLibrary {
        &self.non_material_texture_library
    }

    pub fn non_material_texture_library_mut(&mut self) -> &mut TextureLibrary {
        &mut self.non_material_texture_library
    }

    // === Mesh features ===

    #[inline]
    #[must_use]
    pub fn num_mesh_features(&self) -> usize {
        self.mesh_features.len()
    }

    #[must_use]
    pub fn mesh_features(&self, index: usize) -> Option<&MeshFeatures> {
        self.mesh_features.get(index)
    }

    pub fn mesh_features_mut(&mut self, index: usize) -> Option<&mut MeshFeatures> {
        self.mesh_features.get_mut(index)
    }

    pub fn add_mesh_features(&mut self, features: MeshFeatures) -> usize {
        self.mesh_features.push(features);
        self.mesh_features_material_masks.push(Vec::new());
        self.mesh_features.len() - 1
    }

    /// Restricts feature set `index` to `material` (cumulative).
    pub fn add_mesh_features_material_mask(&mut self, index: usize, material: usize) {
        if let Some(mask) = self.mesh_features_material_masks.get_mut(index) {
            mask.push(material);
        }
    }

    #[must_use]
    pub fn mesh_features_material_mask(&self, index: usize) -> &[usize] {
        self.mesh_features_material_masks
            .get(index)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Appends to `self` a copy of every feature set of `src` that applies to
    /// `material`: unmasked sets and sets whose mask lists it.
    pub fn copy_mesh_features_for_material(&mut self, src: &Mesh, material: usize) {
        for (i, features) in src.mesh_features.iter().enumerate() {
            let mask = src.mesh_features_material_mask(i);
            if mask.is_empty() || mask.contains(&material) {
                self.add_mesh_features(features.clone());
            }
        }
    }

    /// Rebinds every feature texture from `src_index`'s library to `dst`.
    pub fn update_mesh_features_texture_pointers(
        &mut self,
        src_index: &FxHashMap<Uuid, usize>,
        dst: &TextureLibrary,
    ) {
        for features in &mut self.mesh_features {
            features.remap_texture(src_index, dst);
        }
    }

    // === Compression ===

    #[inline]
    #[must_use]
    pub fn is_compression_enabled(&self) -> bool {
        self.compression_enabled
    }

    pub fn set_compression_enabled(&mut self, enabled: bool) {
        self.compression_enabled = enabled;
    }

    #[must_use]
    pub fn compression_options(&self) -> &CompressionOptions {
        &self.compression_options
    }

    pub fn set_compression_options(&mut self, options: CompressionOptions) {
        self.compression_options = options;
    }

    // === Geometry ===

    /// Bounds of every position value (not only the referenced ones).
    #[must_use]
    pub fn compute_bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        if let Some(positions) = self.named_attribute(AttributeKind::Position) {
            for i in 0..positions.size() {
                if let Some(p) = positions.value_vec3(i) {
                    bbox.update(p);
                }
            }
        }
        bbox
    }

    /// Applies `matrix` to positions, the inverse transpose of its linear
    /// part to normals and the linear part itself to tangents. Directions are
    /// renormalized.
    ///
    /// A singular linear part collapses normals to zero; positions are still
    /// transformed.
    pub fn transform(&mut self, matrix: &DMat4) {
        let linear = DMat3::from_mat4(*matrix);
        let normal_matrix = if linear.determinant().abs() < f64::EPSILON {
            DMat3::ZERO
        } else {
            linear.inverse().transpose()
        };

        for attribute in &mut self.attributes {
            let n = attribute.num_components;
            if n < 3 {
                continue;
            }
            let kind = attribute.kind;
            for value in attribute.values_mut().chunks_exact_mut(n) {
                let v = DVec3::new(value[0].into(), value[1].into(), value[2].into());
                let out = match kind {
                    AttributeKind::Position => matrix.transform_point3(v),
                    AttributeKind::Normal => (normal_matrix * v).normalize_or_zero(),
                    AttributeKind::Tangent => (linear * v).normalize_or_zero(),
                    _ => continue,
                };
                value[..3].copy_from_slice(&out.as_vec3().to_array());
            }
        }
    }
}

/// Attribute id after attribute `removed` was dropped from a mesh.
pub(crate) fn shift_past_removed(id: Option<usize>, removed: usize) -> Option<usize> {
    match id {
        Some(id) if id == removed => None,
        Some(id) if id > removed => Some(id - 1),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::with_positions(&[Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]])
    }

    #[test]
    fn test_named_attribute_lookup_counts_by_kind() {
        let mut mesh = triangle();
        mesh.add_attribute(PointAttribute::new(AttributeKind::TexCoord, 2, vec![0.0; 6]));
        mesh.add_attribute(PointAttribute::new(AttributeKind::TexCoord, 2, vec![1.0; 6]));
        assert_eq!(mesh.num_named_attributes(AttributeKind::TexCoord), 2);
        assert_eq!(mesh.named_attribute_id_nth(AttributeKind::TexCoord, 1), Some(2));
        assert_eq!(mesh.named_attribute_id(AttributeKind::Normal), None);
    }

    #[test]
    fn test_point_map_shares_values() {
        let att = PointAttribute::with_point_map(
            AttributeKind::Material,
            1,
            vec![0.0, 3.0],
            vec![0, 0, 1, 1],
        );
        assert_eq!(att.size(), 2);
        assert_eq!(att.point_value(3), Some(&[3.0][..]));
        assert_eq!(att.value_as_index(1), Some(3));
    }

    #[test]
    fn test_transform_moves_positions_and_bounds() {
        let mut mesh = triangle();
        mesh.transform(&DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)));
        let bbox = mesh.compute_bounding_box();
        assert_eq!(bbox.min, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 1.0, 5.0));
    }

    #[test]
    fn test_singular_transform_flattens_positions_and_zeroes_normals() {
        let mut mesh = triangle();
        mesh.add_attribute(PointAttribute::new(
            AttributeKind::Normal,
            3,
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        ));
        mesh.transform(&DMat4::from_scale(DVec3::new(2.0, 2.0, 0.0)));

        let bbox = mesh.compute_bounding_box();
        assert_eq!(bbox.max, Vec3::new(2.0, 2.0, 0.0));
        let normals = mesh.named_attribute(AttributeKind::Normal).unwrap();
        assert_eq!(normals.value_vec3(0), Some(Vec3::ZERO));
    }

    #[test]
    fn test_delete_attribute_shifts_feature_attribute_indices() {
        let mut mesh = triangle();
        mesh.add_attribute(PointAttribute::new(AttributeKind::TexCoord, 2, vec![0.0; 6]));
        mesh.add_attribute(PointAttribute::new(AttributeKind::Generic, 1, vec![0.0; 3]));
        mesh.add_mesh_features(MeshFeatures {
            attribute_index: Some(2),
            ..MeshFeatures::default()
        });
        mesh.add_mesh_features(MeshFeatures {
            attribute_index: Some(1),
            ..MeshFeatures::default()
        });
        mesh.add_mesh_features(MeshFeatures::default());

        assert!(mesh.delete_attribute(1).is_some());
        assert_eq!(mesh.mesh_features(0).unwrap().attribute_index, Some(1));
        assert_eq!(mesh.mesh_features(1).unwrap().attribute_index, None);
        assert_eq!(mesh.mesh_features(2).unwrap().attribute_index, None);

        assert!(mesh.delete_attribute(5).is_none());
        assert_eq!(mesh.mesh_features(0).unwrap().attribute_index, Some(1));
    }

    #[test]
    fn test_copy_mesh_features_for_material_respects_masks() {
        let mut src = triangle();
        let all = src.add_mesh_features(MeshFeatures {
            label: "all".into(),
            ..MeshFeatures::default()
        });
        let only_one = src.add_mesh_features(MeshFeatures {
            label: "one".into(),
            ..MeshFeatures::default()
        });
        src.add_mesh_features_material_mask(only_one, 1);
        assert_eq!(all, 0);

        let mut dst = Mesh::new();
        dst.copy_mesh_features_for_material(&src, 0);
        assert_eq!(dst.num_mesh_features(), 1);

        let mut dst = Mesh::new();
        dst.copy_mesh_features_for_material(&src, 1);
        assert_eq!(dst.num_mesh_features(), 2);
    }
}

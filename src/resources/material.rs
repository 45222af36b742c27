use glam::Vec4;
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::resources::texture::TextureLibrary;

/// Semantic slot a texture is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureMapKind {
    #[default]
    Color,
    Opacity,
    MetallicRoughness,
    Normal,
    Occlusion,
    Emissive,
    /// Non-material data such as mesh feature IDs.
    Generic,
}

/// A texture binding: which texture, which slot, which UV set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextureMap {
    pub kind: TextureMapKind,
    /// Index of the `TexCoord` attribute the texture is sampled with.
    pub tex_coord_index: usize,
    /// Identity of the texture in the owning library, if bound.
    pub texture: Option<Uuid>,
}

impl TextureMap {
    #[must_use]
    pub fn new(kind: TextureMapKind, tex_coord_index: usize, texture: Option<Uuid>) -> Self {
        Self {
            kind,
            tex_coord_index,
            texture,
        }
    }

    /// Rebinds the texture from its source library to the matching entry of
    /// `dst`, given the source library's identity map.
    ///
    /// Textures unknown to `src_index` are left unbound.
    pub fn remap_texture(&mut self, src_index: &FxHashMap<Uuid, usize>, dst: &TextureLibrary) {
        let Some(old) = self.texture else {
            return;
        };
        self.texture = src_index
            .get(&old)
            .and_then(|&i| dst.texture(i))
            .map(|t| t.uuid);
        if self.texture.is_none() {
            log::warn!("Texture {old} has no counterpart in the destination library");
        }
    }
}

/// Material properties. Only texture bindings are interpreted by scene code.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color_factor: Vec4,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub double_sided: bool,
    texture_maps: Vec<TextureMap>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color_factor: Vec4::ONE,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            double_sided: false,
            texture_maps: Vec::new(),
        }
    }
}

impl Material {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn num_texture_maps(&self) -> usize {
        self.texture_maps.len()
    }

    #[must_use]
    pub fn texture_map(&self, index: usize) -> Option<&TextureMap> {
        self.texture_maps.get(index)
    }

    pub fn texture_maps(&self) -> &[TextureMap] {
        &self.texture_maps
    }

    pub fn texture_maps_mut(&mut self) -> &mut [TextureMap] {
        &mut self.texture_maps
    }

    pub fn add_texture_map(&mut self, texture_map: TextureMap) {
        self.texture_maps.push(texture_map);
    }
}

// ============================================================================
// MaterialLibrary
// ============================================================================

/// Index-addressed materials plus the textures they sample and the names of
/// the material variants that mesh instances may switch between.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
    texture_library: TextureLibrary,
    materials_variants_names: Vec<String>,
}

impl MaterialLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn num_materials(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn material(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    pub fn material_mut(&mut self, index: usize) -> Option<&mut Material> {
        self.materials.get_mut(index)
    }

    /// Returns the material at `index`, growing the library with default
    /// materials when it is shorter than that.
    pub fn mutable_material(&mut self, index: usize) -> &mut Material {
        if index >= self.materials.len() {
            self.materials.resize_with(index + 1, Material::default);
        }
        &mut self.materials[index]
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    pub fn remove_material(&mut self, index: usize) -> Option<Material> {
        (index < self.materials.len()).then(|| self.materials.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        self.materials.iter()
    }

    pub fn texture_library(&self) -> &TextureLibrary {
        &self.texture_library
    }

    pub fn texture_library_mut(&mut self) -> &mut TextureLibrary {
        &mut self.texture_library
    }

    pub fn add_materials_variant(&mut self, name: impl Into<String>) -> usize {
        self.materials_variants_names.push(name.into());
        self.materials_variants_names.len() - 1
    }

    #[must_use]
    pub fn num_materials_variants(&self) -> usize {
        self.materials_variants_names.len()
    }

    #[must_use]
    pub fn materials_variant_name(&self, index: usize) -> Option<&str> {
        self.materials_variants_names.get(index).map(String::as_str)
    }

    /// Removes every material, texture and variant name.
    pub fn clear(&mut self) {
        self.materials.clear();
        self.texture_library.clear();
        self.materials_variants_names.clear();
    }

    /// Deep copy of `src`. Textures are duplicated and every texture map is
    /// rebound to the duplicate.
    pub fn copy_from(&mut self, src: &MaterialLibrary) {
        self.texture_library.copy_from(&src.texture_library);
        let index = src.texture_library.compute_texture_to_index_map();
        self.materials = src.materials.clone();
        for material in &mut self.materials {
            for texture_map in &mut material.texture_maps {
                texture_map.remap_texture(&index, &self.texture_library);
            }
        }
        self.materials_variants_names = src.materials_variants_names.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::texture::Texture;

    #[test]
    fn test_mutable_material_grows_library() {
        let mut lib = MaterialLibrary::new();
        lib.mutable_material(2).name = "third".into();
        assert_eq!(lib.num_materials(), 3);
        assert_eq!(lib.material(2).unwrap().name, "third");
        assert_eq!(lib.material(0).unwrap(), &Material::default());
    }

    #[test]
    fn test_copy_from_rebinds_textures() {
        let mut src = MaterialLibrary::new();
        let tex = src.texture_library_mut().push_texture(Texture::new("albedo"));
        let uuid = src.texture_library().texture(tex).unwrap().uuid;
        let mut material = Material::new("m");
        material.add_texture_map(TextureMap::new(TextureMapKind::Color, 0, Some(uuid)));
        src.add_material(material);

        let mut dst = MaterialLibrary::new();
        dst.copy_from(&src);

        let bound = dst.material(0).unwrap().texture_map(0).unwrap().texture.unwrap();
        assert_ne!(bound, uuid);
        assert_eq!(dst.texture_library().index_of(bound), Some(0));
    }
}

use rustc_hash::FxHashMap;
use uuid::Uuid;

// ============================================================================
// Texture
// ============================================================================

/// Encoded image payload with a stable identity.
///
/// Texture maps refer to textures by [`Uuid`] rather than by position so the
/// reference survives copies between libraries (mesh to scene and back). A
/// copied texture receives a fresh id; the old-to-new mapping is resolved
/// through [`TextureLibrary::compute_texture_to_index_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
    /// Encoded bytes (PNG, JPEG, KTX2, ...). Never decoded here.
    pub data: Vec<u8>,
}

impl Default for Texture {
    fn default() -> Self {
        Self::new("")
    }
}

impl Texture {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            mime_type: String::new(),
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Same payload under a new identity.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

// ============================================================================
// TextureLibrary
// ============================================================================

/// Index-addressed texture storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureLibrary {
    textures: Vec<Texture>,
}

impl TextureLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `texture` and returns its index.
    pub fn push_texture(&mut self, texture: Texture) -> usize {
        self.textures.push(texture);
        self.textures.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn num_textures(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    #[must_use]
    pub fn texture(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    #[inline]
    pub fn texture_mut(&mut self, index: usize) -> Option<&mut Texture> {
        self.textures.get_mut(index)
    }

    pub fn remove_texture(&mut self, index: usize) -> Option<Texture> {
        (index < self.textures.len()).then(|| self.textures.remove(index))
    }

    #[must_use]
    pub fn index_of(&self, uuid: Uuid) -> Option<usize> {
        self.textures.iter().position(|t| t.uuid == uuid)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Texture> {
        self.textures.iter()
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }

    /// Replaces the contents with duplicates of every texture in `src`.
    ///
    /// Positions are preserved, identities are not: index `i` here holds a
    /// fresh-id copy of index `i` in `src`.
    pub fn copy_from(&mut self, src: &TextureLibrary) {
        self.textures = src.textures.iter().map(Texture::duplicate).collect();
    }

    /// Identity to position map, used to migrate texture references from this
    /// library into a library produced by [`copy_from`](Self::copy_from).
    #[must_use]
    pub fn compute_texture_to_index_map(&self) -> FxHashMap<Uuid, usize> {
        self.textures
            .iter()
            .enumerate()
            .map(|(i, t)| (t.uuid, i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_from_mints_new_ids_in_same_order() {
        let mut src = TextureLibrary::new();
        src.push_texture(Texture::new("a"));
        src.push_texture(Texture::new("b"));

        let mut dst = TextureLibrary::new();
        dst.copy_from(&src);

        assert_eq!(dst.num_textures(), 2);
        for i in 0..2 {
            let (s, d) = (src.texture(i).unwrap(), dst.texture(i).unwrap());
            assert_eq!(s.name, d.name);
            assert_ne!(s.uuid, d.uuid);
        }

        let map = src.compute_texture_to_index_map();
        assert_eq!(map[&src.texture(1).unwrap().uuid], 1);
    }
}

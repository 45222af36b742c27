//! Per-mesh geometry compression settings across a whole scene.

use crate::resources::CompressionOptions;
use crate::scene::Scene;

/// Enables compression with `options` on every base mesh, or disables it
/// everywhere when `options` is `None`.
pub fn set_compression_options(options: Option<&CompressionOptions>, scene: &mut Scene) {
    for mesh in scene.meshes_mut().iter_mut() {
        match options {
            Some(options) => {
                mesh.set_compression_enabled(true);
                mesh.set_compression_options(*options);
            }
            None => mesh.set_compression_enabled(false),
        }
    }
}

/// `true` if any base mesh has compression enabled.
#[must_use]
pub fn is_compression_enabled(scene: &Scene) -> bool {
    scene.meshes().iter().any(|mesh| mesh.is_compression_enabled())
}

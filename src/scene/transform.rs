use glam::{DMat4, DQuat, DVec3};

/// Local transform of a scene node.
///
/// The transform is expressed either as a full matrix or as separate
/// translation, rotation and scale parts, each of which may be unset. Unset
/// parts fall back to identity when the matrix is computed; a set matrix
/// takes precedence over every TRS part.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrsMatrix {
    matrix: Option<DMat4>,
    translation: Option<DVec3>,
    rotation: Option<DQuat>,
    scale: Option<DVec3>,
}

impl TrsMatrix {
    /// Identity transform with nothing set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_matrix(matrix: DMat4) -> Self {
        Self {
            matrix: Some(matrix),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_translation(translation: DVec3) -> Self {
        Self {
            translation: Some(translation),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_scale_rotation_translation(
        scale: DVec3,
        rotation: DQuat,
        translation: DVec3,
    ) -> Self {
        Self {
            matrix: None,
            translation: Some(translation),
            rotation: Some(rotation),
            scale: Some(scale),
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    pub fn set_matrix(&mut self, matrix: DMat4) -> &mut Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn set_translation(&mut self, translation: DVec3) -> &mut Self {
        self.translation = Some(translation);
        self
    }

    pub fn set_rotation(&mut self, rotation: DQuat) -> &mut Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn set_scale(&mut self, scale: DVec3) -> &mut Self {
        self.scale = Some(scale);
        self
    }

    // ========================================================================
    // Getters
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> Option<DMat4> {
        self.matrix
    }

    #[inline]
    #[must_use]
    pub fn translation(&self) -> Option<DVec3> {
        self.translation
    }

    #[inline]
    #[must_use]
    pub fn rotation(&self) -> Option<DQuat> {
        self.rotation
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Option<DVec3> {
        self.scale
    }

    /// `true` when neither the matrix nor any TRS part is set.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.matrix.is_none()
            && self.translation.is_none()
            && self.rotation.is_none()
            && self.scale.is_none()
    }

    /// Local transform as a matrix: the set matrix, or `T * R * S`.
    #[must_use]
    pub fn compute_transformation_matrix(&self) -> DMat4 {
        if let Some(matrix) = self.matrix {
            return matrix;
        }
        DMat4::from_scale_rotation_translation(
            self.scale.unwrap_or(DVec3::ONE),
            self.rotation.unwrap_or(DQuat::IDENTITY),
            self.translation.unwrap_or(DVec3::ZERO),
        )
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.compute_transformation_matrix() == DMat4::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_overrides_trs() {
        let mut trs = TrsMatrix::from_translation(DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(
            trs.compute_transformation_matrix(),
            DMat4::from_translation(DVec3::new(1.0, 0.0, 0.0))
        );
        trs.set_matrix(DMat4::from_scale(DVec3::splat(2.0)));
        assert_eq!(
            trs.compute_transformation_matrix(),
            DMat4::from_scale(DVec3::splat(2.0))
        );
    }

    #[test]
    fn test_trs_order_scales_before_translating() {
        let trs = TrsMatrix::from_scale_rotation_translation(
            DVec3::splat(2.0),
            DQuat::IDENTITY,
            DVec3::new(0.0, 3.0, 0.0),
        );
        let p = trs.compute_transformation_matrix().transform_point3(DVec3::ONE);
        assert_eq!(p, DVec3::new(2.0, 5.0, 2.0));
        assert!(TrsMatrix::new().is_identity());
        assert!(TrsMatrix::new().is_unset());
    }
}

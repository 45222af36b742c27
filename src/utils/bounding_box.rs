use glam::{DMat4, DVec3, Vec3};

/// Axis-aligned bounding box in single precision.
///
/// A freshly created box is *empty* (`min = +inf`, `max = -inf`) so that
/// the first [`update`](Self::update) collapses it onto a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns `false` until at least one point has been accumulated.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    pub fn update(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box enclosing the eight corners of `self` after `matrix`.
    ///
    /// Empty boxes stay empty.
    #[must_use]
    pub fn transform(&self, matrix: &DMat4) -> Self {
        if !self.is_valid() {
            return *self;
        }
        let mut out = Self::empty();
        for i in 0..8 {
            let corner = DVec3::new(
                f64::from(if i & 1 == 0 { self.min.x } else { self.max.x }),
                f64::from(if i & 2 == 0 { self.min.y } else { self.max.y }),
                f64::from(if i & 4 == 0 { self.min.z } else { self.max.z }),
            );
            out.update(matrix.transform_point3(corner).as_vec3());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box_is_invalid_until_updated() {
        let mut bbox = BoundingBox::empty();
        assert!(!bbox.is_valid());
        bbox.update(Vec3::new(1.0, 2.0, 3.0));
        assert!(bbox.is_valid());
        assert_eq!(bbox.min, bbox.max);
    }

    #[test]
    fn test_union_and_translate() {
        let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(0.5));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::ONE);

        let moved = a.transform(&DMat4::from_translation(DVec3::new(2.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(moved.max, Vec3::new(3.0, 1.0, 1.0));
    }
}

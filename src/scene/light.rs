use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// Radians from the axis where falloff begins.
    pub inner_cone: f32,
    /// Radians from the axis where light reaches zero.
    pub outer_cone: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            inner_cone: 0.0,
            outer_cone: std::f32::consts::FRAC_PI_4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Directional,
    Point,
    Spot(SpotLight),
}

/// Punctual light attached to scene nodes. It shines down the node's -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub name: String,
    pub color: Vec3,
    /// Candela for point and spot lights, lux for directional lights.
    pub intensity: f32,
    /// Attenuation cut-off distance, `None` for infinite.
    pub range: Option<f32>,
    pub kind: LightKind,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Vec3::ONE,
            intensity: 1.0,
            range: None,
            kind: LightKind::Point,
        }
    }
}

impl Light {
    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn new_point(color: Vec3, intensity: f32, range: Option<f32>) -> Self {
        Self {
            color,
            intensity,
            range,
            kind: LightKind::Point,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn new_spot(color: Vec3, intensity: f32, range: Option<f32>, spot: SpotLight) -> Self {
        Self {
            color,
            intensity,
            range,
            kind: LightKind::Spot(spot),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

/// Keyframe data shared by one or more channels.
///
/// `output` is flat: `components` floats per keyframe, or three times that
/// for [`InterpolationMode::CubicSpline`] (in-tangent, value, out-tangent).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationSampler {
    pub input: Vec<f32>,
    pub output: Vec<f32>,
    pub components: usize,
    pub interpolation: InterpolationMode,
}

impl AnimationSampler {
    #[must_use]
    pub fn new(
        input: Vec<f32>,
        output: Vec<f32>,
        components: usize,
        interpolation: InterpolationMode,
    ) -> Self {
        Self {
            input,
            output,
            components,
            interpolation,
        }
    }

    #[inline]
    #[must_use]
    pub fn num_keyframes(&self) -> usize {
        self.input.len()
    }

    /// Time of the last keyframe, zero when empty.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.input.last().copied().unwrap_or(0.0)
    }

    /// Checks that `output` holds exactly one entry per keyframe.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let per_key = match self.interpolation {
            InterpolationMode::CubicSpline => self.components * 3,
            _ => self.components,
        };
        per_key > 0 && self.output.len() == self.input.len() * per_key
    }
}

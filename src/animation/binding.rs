use crate::scene::SceneNodeIndex;

/// Node property an animation channel drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    Translation,
    Rotation,
    Scale,
    /// Morph target weights of the node's meshes.
    Weights,
}

impl TargetPath {
    /// Number of output components per keyframe.
    #[must_use]
    pub const fn components(self) -> Option<usize> {
        match self {
            TargetPath::Translation | TargetPath::Scale => Some(3),
            TargetPath::Rotation => Some(4),
            TargetPath::Weights => None,
        }
    }
}

/// Binds sampler `sampler_index` of an animation to a property of node
/// `target_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationChannel {
    pub target_index: SceneNodeIndex,
    pub target_path: TargetPath,
    pub sampler_index: usize,
}

impl AnimationChannel {
    #[must_use]
    pub fn new(
        target_index: SceneNodeIndex,
        target_path: TargetPath,
        sampler_index: usize,
    ) -> Self {
        Self {
            target_index,
            target_path,
            sampler_index,
        }
    }
}

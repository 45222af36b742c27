use glam::DMat4;

use crate::scene::SceneNodeIndex;

/// Joint hierarchy a skinned mesh is bound to.
///
/// `joints[i]` corresponds to joint `i` of the skinned mesh's joint
/// attribute, and to `inverse_bind_matrices[i]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    pub name: String,
    /// Transforms mesh space into each joint's local space.
    pub inverse_bind_matrices: Vec<DMat4>,
    joints: Vec<SceneNodeIndex>,
    /// Common root of the joints, `INVALID` when unspecified.
    joint_root: SceneNodeIndex,
}

impl Skin {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_joint(&mut self, joint: SceneNodeIndex) -> usize {
        self.joints.push(joint);
        self.joints.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn num_joints(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn joint(&self, index: usize) -> Option<SceneNodeIndex> {
        self.joints.get(index).copied()
    }

    pub fn joint_mut(&mut self, index: usize) -> Option<&mut SceneNodeIndex> {
        self.joints.get_mut(index)
    }

    pub fn joints(&self) -> &[SceneNodeIndex] {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut [SceneNodeIndex] {
        &mut self.joints
    }

    #[inline]
    #[must_use]
    pub fn joint_root(&self) -> SceneNodeIndex {
        self.joint_root
    }

    pub fn set_joint_root(&mut self, joint_root: SceneNodeIndex) {
        self.joint_root = joint_root;
    }
}

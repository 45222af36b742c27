use crate::scene::transform::TrsMatrix;
use crate::scene::{InstanceArrayIndex, LightIndex, MeshGroupIndex, SceneNodeIndex, SkinIndex};

/// A node of the scene DAG.
///
/// # Hierarchy
///
/// Nodes may have several parents: a sub-tree shared by two parents is drawn
/// once per path, which is how geometry is instanced. Parent and child lists
/// are plain index lists into the owning [`Scene`](crate::scene::Scene);
/// prefer [`Scene::attach`](crate::scene::Scene::attach), which keeps both
/// sides in sync.
///
/// # Attachments
///
/// Every attachment index defaults to `INVALID`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneNode {
    pub name: String,
    trs_matrix: TrsMatrix,

    mesh_group_index: MeshGroupIndex,
    skin_index: SkinIndex,
    light_index: LightIndex,
    instance_array_index: InstanceArrayIndex,

    // === Core Hierarchy ===
    pub(crate) parents: Vec<SceneNodeIndex>,
    pub(crate) children: Vec<SceneNodeIndex>,
}

impl SceneNode {
    /// Creates a detached node with no attachments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `self` with a copy of `src`, hierarchy links included.
    pub fn copy_from(&mut self, src: &SceneNode) {
        self.clone_from(src);
    }

    // === Transform ===

    /// Returns the local transform.
    #[inline]
    #[must_use]
    pub fn trs_matrix(&self) -> &TrsMatrix {
        &self.trs_matrix
    }

    /// Returns the local transform for in-place edits.
    #[inline]
    pub fn trs_matrix_mut(&mut self) -> &mut TrsMatrix {
        &mut self.trs_matrix
    }

    /// Replaces the local transform.
    pub fn set_trs_matrix(&mut self, trs_matrix: TrsMatrix) {
        self.trs_matrix = trs_matrix;
    }

    // === Attachments ===

    /// Returns the mesh group drawn at this node, `INVALID` if none.
    #[inline]
    #[must_use]
    pub fn mesh_group_index(&self) -> MeshGroupIndex {
        self.mesh_group_index
    }

    /// Attaches a mesh group; `INVALID` detaches it.
    pub fn set_mesh_group_index(&mut self, index: MeshGroupIndex) {
        self.mesh_group_index = index;
    }

    /// Returns the skin handle, `INVALID` if none.
    #[inline]
    #[must_use]
    pub fn skin_index(&self) -> SkinIndex {
        self.skin_index
    }

    /// Sets the skin handle.
    pub fn set_skin_index(&mut self, index: SkinIndex) {
        self.skin_index = index;
    }

    /// Returns the light handle, `INVALID` if none.
    #[inline]
    #[must_use]
    pub fn light_index(&self) -> LightIndex {
        self.light_index
    }

    /// Sets the light handle.
    pub fn set_light_index(&mut self, index: LightIndex) {
        self.light_index = index;
    }

    /// Returns the instance array handle, `INVALID` if none.
    #[inline]
    #[must_use]
    pub fn instance_array_index(&self) -> InstanceArrayIndex {
        self.instance_array_index
    }

    /// Sets the instance array handle.
    pub fn set_instance_array_index(&mut self, index: InstanceArrayIndex) {
        self.instance_array_index = index;
    }

    // === Hierarchy ===

    /// Returns the number of parents. Roots have none.
    #[inline]
    #[must_use]
    pub fn num_parents(&self) -> usize {
        self.parents.len()
    }

    /// Returns the `index`-th parent handle, if any.
    #[must_use]
    pub fn parent(&self, index: usize) -> Option<SceneNodeIndex> {
        self.parents.get(index).copied()
    }

    /// Returns every parent handle.
    #[inline]
    #[must_use]
    pub fn parents(&self) -> &[SceneNodeIndex] {
        &self.parents
    }

    /// Low-level: records `parent` without touching the parent's children.
    pub fn add_parent_index(&mut self, parent: SceneNodeIndex) {
        self.parents.push(parent);
    }

    /// Clears the parent list. Parents keep their child entries.
    pub fn remove_all_parents(&mut self) {
        self.parents.clear();
    }

    /// Returns the number of children.
    #[inline]
    #[must_use]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Returns the `index`-th child handle, if any.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<SceneNodeIndex> {
        self.children.get(index).copied()
    }

    /// Returns every child handle.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[SceneNodeIndex] {
        &self.children
    }

    /// Low-level: records `child` without touching the child's parents.
    pub fn add_child_index(&mut self, child: SceneNodeIndex) {
        self.children.push(child);
    }

    /// Clears the child list. Children keep their parent entries.
    pub fn remove_all_children(&mut self) {
        self.children.clear();
    }
}

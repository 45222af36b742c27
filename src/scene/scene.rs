use crate::animation::Animation;
use crate::errors::{Result, SceneError};
use crate::resources::{MaterialLibrary, Mesh, Metadata, StructuralMetadata, TextureLibrary};
use crate::scene::{
    AnimationIndex, InstanceArray, InstanceArrayIndex, Light, LightIndex, MeshGroup,
    MeshGroupIndex, MeshIndex, SceneNode, SceneNodeIndex, Skin, SkinIndex,
};
use crate::utils::IndexVec;

/// Scene graph structure
///
/// `Scene` is the sole owner of every entity of an asset. Entities live in
/// index-addressed sequences and refer to each other through typed indices;
/// every stored index is either `INVALID` or in range.
///
/// # Removal and renumbering
///
/// Removing an entity shifts every later entity down by one. The removal
/// methods patch all references they own, but indices held by the caller
/// are invalidated and must be re-resolved.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    meshes: IndexVec<MeshIndex, Mesh>,
    mesh_groups: IndexVec<MeshGroupIndex, MeshGroup>,
    nodes: IndexVec<SceneNodeIndex, SceneNode>,
    root_node_indices: Vec<SceneNodeIndex>,

    // ==== Node attachments ====
    animations: IndexVec<AnimationIndex, Animation>,
    skins: IndexVec<SkinIndex, Skin>,
    lights: IndexVec<LightIndex, Light>,
    instance_arrays: IndexVec<InstanceArrayIndex, InstanceArray>,

    // ==== Libraries ====
    material_library: MaterialLibrary,
    non_material_texture_library: TextureLibrary,
    structural_metadata: StructuralMetadata,
    metadata: Metadata,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces `self` with a deep copy of `src`.
    pub fn copy_from(&mut self, src: &Scene) {
        self.clone_from(src);
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    /// Adds a base mesh and returns its handle.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshIndex {
        self.meshes.push(mesh)
    }

    /// Returns the number of base meshes.
    #[inline]
    #[must_use]
    pub fn num_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Returns the base mesh at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get_mesh(&self, index: MeshIndex) -> Option<&Mesh> {
        self.meshes.get(index)
    }

    /// Returns the base mesh at `index` for editing, if any.
    #[inline]
    pub fn get_mesh_mut(&mut self, index: MeshIndex) -> Option<&mut Mesh> {
        self.meshes.get_mut(index)
    }

    /// Returns every base mesh.
    #[must_use]
    pub fn meshes(&self) -> &IndexVec<MeshIndex, Mesh> {
        &self.meshes
    }

    pub(crate) fn meshes_mut(&mut self) -> &mut IndexVec<MeshIndex, Mesh> {
        &mut self.meshes
    }

    /// Removes base mesh `index` together with every instance of it, and
    /// renumbers the instances of later meshes.
    ///
    /// Placeholder instances (`INVALID` mesh) are left alone.
    pub fn remove_mesh(&mut self, index: MeshIndex) -> Result<()> {
        if self.meshes.remove(index).is_none() {
            return Err(SceneError::IndexOutOfRange {
                context: "mesh",
                index: index.value(),
            });
        }
        for group in self.mesh_groups.iter_mut() {
            group.remove_mesh_instances(index);
            for instance in group.mesh_instances_mut() {
                if instance.mesh_index.is_valid() && instance.mesh_index > index {
                    instance.mesh_index = MeshIndex::new(instance.mesh_index.value() - 1);
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Mesh groups
    // ========================================================================

    /// Adds a mesh group and returns its handle.
    pub fn add_mesh_group(&mut self, group: MeshGroup) -> MeshGroupIndex {
        self.mesh_groups.push(group)
    }

    /// Returns the number of mesh groups.
    #[inline]
    #[must_use]
    pub fn num_mesh_groups(&self) -> usize {
        self.mesh_groups.len()
    }

    /// Returns the mesh group at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get_mesh_group(&self, index: MeshGroupIndex) -> Option<&MeshGroup> {
        self.mesh_groups.get(index)
    }

    /// Returns the mesh group at `index` for editing, if any.
    #[inline]
    pub fn get_mesh_group_mut(&mut self, index: MeshGroupIndex) -> Option<&mut MeshGroup> {
        self.mesh_groups.get_mut(index)
    }

    /// Returns every mesh group.
    #[must_use]
    pub fn mesh_groups(&self) -> &IndexVec<MeshGroupIndex, MeshGroup> {
        &self.mesh_groups
    }

    pub(crate) fn mesh_groups_mut(&mut self) -> &mut IndexVec<MeshGroupIndex, MeshGroup> {
        &mut self.mesh_groups
    }

    /// Removes mesh group `index`. Nodes using it are detached from it and
    /// nodes using a later group are renumbered.
    pub fn remove_mesh_group(&mut self, index: MeshGroupIndex) -> Result<()> {
        if self.mesh_groups.remove(index).is_none() {
            return Err(SceneError::IndexOutOfRange {
                context: "mesh group",
                index: index.value(),
            });
        }
        for node in self.nodes.iter_mut() {
            let mgi = node.mesh_group_index();
            if mgi == index {
                node.set_mesh_group_index(MeshGroupIndex::INVALID);
            } else if mgi.is_valid() && mgi > index {
                node.set_mesh_group_index(MeshGroupIndex::new(mgi.value() - 1));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Materials
    // ========================================================================

    /// Returns the scene-wide material library.
    #[must_use]
    pub fn material_library(&self) -> &MaterialLibrary {
        &self.material_library
    }

    /// Returns the material library for editing.
    pub fn material_library_mut(&mut self) -> &mut MaterialLibrary {
        &mut self.material_library
    }

    /// First mesh group with an instance bound to material `index`.
    fn find_material_user(&self, index: usize) -> Option<MeshGroupIndex> {
        self.mesh_groups.iter_enumerated().find_map(|(mgi, group)| {
            group
                .mesh_instances()
                .iter()
                .any(|i| i.material_index == Some(index))
                .then_some(mgi)
        })
    }

    /// `true` when no mesh instance is bound to material `index`.
    #[must_use]
    pub fn is_material_unused(&self, index: usize) -> bool {
        self.find_material_user(index).is_none()
    }

    /// Removes material `index` and renumbers instance bindings to later
    /// materials.
    ///
    /// Fails without modifying the scene if `index` is out of range or any
    /// mesh instance is still bound to it. Variant mappings to the removed
    /// material are dropped.
    pub fn remove_material(&mut self, index: usize) -> Result<()> {
        if index >= self.material_library.num_materials() {
            return Err(SceneError::IndexOutOfRange {
                context: "material",
                index,
            });
        }
        if let Some(mesh_group) = self.find_material_user(index) {
            return Err(SceneError::MaterialInUse {
                material: index,
                mesh_group,
            });
        }

        for group in self.mesh_groups.iter_mut() {
            for instance in group.mesh_instances_mut() {
                if let Some(m) = instance.material_index
                    && m > index
                {
                    instance.material_index = Some(m - 1);
                }
                instance
                    .materials_variants_mappings
                    .retain(|mapping| mapping.material != index);
                for mapping in &mut instance.materials_variants_mappings {
                    if mapping.material > index {
                        mapping.material -= 1;
                    }
                }
            }
        }
        self.material_library.remove_material(index);
        Ok(())
    }

    /// Returns the library of textures not owned by a material.
    #[must_use]
    pub fn non_material_texture_library(&self) -> &TextureLibrary {
        &self.non_material_texture_library
    }

    /// Returns the non-material texture library for editing.
    pub fn non_material_texture_library_mut(&mut self) -> &mut TextureLibrary {
        &mut self.non_material_texture_library
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Appends a default node. It is not a root until added as one.
    pub fn create_node(&mut self) -> SceneNodeIndex {
        self.nodes.push(SceneNode::new())
    }

    /// Adds `node` and returns its handle.
    pub fn add_node(&mut self, node: SceneNode) -> SceneNodeIndex {
        self.nodes.push(node)
    }

    /// Returns the number of nodes.
    #[inline]
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the node at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get_node(&self, index: SceneNodeIndex) -> Option<&SceneNode> {
        self.nodes.get(index)
    }

    /// Returns the node at `index` for editing, if any.
    #[inline]
    pub fn get_node_mut(&mut self, index: SceneNodeIndex) -> Option<&mut SceneNode> {
        self.nodes.get_mut(index)
    }

    /// Returns every node.
    #[must_use]
    pub fn nodes(&self) -> &IndexVec<SceneNodeIndex, SceneNode> {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut IndexVec<SceneNodeIndex, SceneNode> {
        &mut self.nodes
    }

    /// Grows the node sequence with default nodes or truncates it.
    ///
    /// Truncation does not patch references to the dropped nodes.
    pub fn resize_nodes(&mut self, num_nodes: usize) {
        self.nodes.resize_with(num_nodes, SceneNode::new);
    }

    /// Makes `child` a child of `parent`, updating both nodes.
    ///
    /// Existing parents of `child` are kept: the node becomes shared.
    pub fn attach(&mut self, child: SceneNodeIndex, parent: SceneNodeIndex) {
        if child == parent {
            log::warn!("Cannot attach node {child} to itself");
            return;
        }
        if self.nodes.get(child).is_none() {
            log::error!("Child node {child} not found during attach");
            return;
        }
        let Some(p) = self.nodes.get_mut(parent) else {
            log::error!("Parent node {parent} not found during attach");
            return;
        };
        p.add_child_index(child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.add_parent_index(parent);
        }
    }

    // === Roots ===

    /// Adds `index` to the root list.
    pub fn add_root_node(&mut self, index: SceneNodeIndex) {
        self.root_node_indices.push(index);
    }

    /// Returns the number of roots.
    #[inline]
    #[must_use]
    pub fn num_root_nodes(&self) -> usize {
        self.root_node_indices.len()
    }

    /// Returns the `i`-th root handle, if any.
    #[must_use]
    pub fn root_node_index(&self, i: usize) -> Option<SceneNodeIndex> {
        self.root_node_indices.get(i).copied()
    }

    /// Returns every root handle, in traversal order.
    #[must_use]
    pub fn root_node_indices(&self) -> &[SceneNodeIndex] {
        &self.root_node_indices
    }

    /// Clears the root list. Nodes are kept.
    pub fn remove_all_root_nodes(&mut self) {
        self.root_node_indices.clear();
    }

    pub(crate) fn root_node_indices_mut(&mut self) -> &mut Vec<SceneNodeIndex> {
        &mut self.root_node_indices
    }

    // ========================================================================
    // Animations, skins, lights, instance arrays
    // ========================================================================

    /// Adds an animation and returns its handle.
    pub fn add_animation(&mut self, animation: Animation) -> AnimationIndex {
        self.animations.push(animation)
    }

    /// Returns the number of animations.
    #[must_use]
    pub fn num_animations(&self) -> usize {
        self.animations.len()
    }

    /// Returns the animation at `index`, if any.
    #[must_use]
    pub fn get_animation(&self, index: AnimationIndex) -> Option<&Animation> {
        self.animations.get(index)
    }

    /// Returns the animation at `index` for editing, if any.
    pub fn get_animation_mut(&mut self, index: AnimationIndex) -> Option<&mut Animation> {
        self.animations.get_mut(index)
    }

    pub(crate) fn animations_mut(&mut self) -> &mut IndexVec<AnimationIndex, Animation> {
        &mut self.animations
    }

    /// Returns every animation.
    #[must_use]
    pub fn animations(&self) -> &IndexVec<AnimationIndex, Animation> {
        &self.animations
    }

    /// Adds a skin and returns its handle.
    pub fn add_skin(&mut self, skin: Skin) -> SkinIndex {
        self.skins.push(skin)
    }

    /// Returns the number of skins.
    #[must_use]
    pub fn num_skins(&self) -> usize {
        self.skins.len()
    }

    /// Returns the skin at `index`, if any.
    #[must_use]
    pub fn get_skin(&self, index: SkinIndex) -> Option<&Skin> {
        self.skins.get(index)
    }

    /// Returns the skin at `index` for editing, if any.
    pub fn get_skin_mut(&mut self, index: SkinIndex) -> Option<&mut Skin> {
        self.skins.get_mut(index)
    }

    /// Returns every skin.
    #[must_use]
    pub fn skins(&self) -> &IndexVec<SkinIndex, Skin> {
        &self.skins
    }

    pub(crate) fn skins_mut(&mut self) -> &mut IndexVec<SkinIndex, Skin> {
        &mut self.skins
    }

    /// Adds a light and returns its handle.
    pub fn add_light(&mut self, light: Light) -> LightIndex {
        self.lights.push(light)
    }

    /// Returns the number of lights.
    #[must_use]
    pub fn num_lights(&self) -> usize {
        self.lights.len()
    }

    /// Returns the light at `index`, if any.
    #[must_use]
    pub fn get_light(&self, index: LightIndex) -> Option<&Light> {
        self.lights.get(index)
    }

    /// Returns the light at `index` for editing, if any.
    pub fn get_light_mut(&mut self, index: LightIndex) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// Adds an instance array and returns its handle.
    pub fn add_instance_array(&mut self, array: InstanceArray) -> InstanceArrayIndex {
        self.instance_arrays.push(array)
    }

    /// Returns the number of instance arrays.
    #[must_use]
    pub fn num_instance_arrays(&self) -> usize {
        self.instance_arrays.len()
    }

    /// Returns the instance array at `index`, if any.
    #[must_use]
    pub fn get_instance_array(&self, index: InstanceArrayIndex) -> Option<&InstanceArray> {
        self.instance_arrays.get(index)
    }

    /// Returns the instance array at `index` for editing, if any.
    pub fn get_instance_array_mut(
        &mut self,
        index: InstanceArrayIndex,
    ) -> Option<&mut InstanceArray> {
        self.instance_arrays.get_mut(index)
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Returns the structural metadata schema and tables.
    #[must_use]
    pub fn structural_metadata(&self) -> &StructuralMetadata {
        &self.structural_metadata
    }

    /// Returns the structural metadata for editing.
    pub fn structural_metadata_mut(&mut self) -> &mut StructuralMetadata {
        &mut self.structural_metadata
    }

    /// Returns the free-form scene metadata.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the scene metadata for editing.
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

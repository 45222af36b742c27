use smallvec::SmallVec;

use crate::scene::MeshIndex;

/// Selects `material` whenever one of the listed variants is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MaterialsVariantsMapping {
    pub material: usize,
    pub variants: SmallVec<[usize; 4]>,
}

impl MaterialsVariantsMapping {
    #[must_use]
    pub fn new(material: usize, variants: impl IntoIterator<Item = usize>) -> Self {
        Self {
            material,
            variants: variants.into_iter().collect(),
        }
    }
}

/// One entry of a [`MeshGroup`]: a base mesh drawn with a material.
///
/// `mesh_index` may be `INVALID`, marking a placeholder without geometry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MeshInstance {
    pub mesh_index: MeshIndex,
    /// Index into the scene material library, `None` for no material.
    pub material_index: Option<usize>,
    pub materials_variants_mappings: Vec<MaterialsVariantsMapping>,
}

impl MeshInstance {
    #[must_use]
    pub fn new(mesh_index: MeshIndex, material_index: Option<usize>) -> Self {
        Self {
            mesh_index,
            material_index,
            materials_variants_mappings: Vec::new(),
        }
    }
}

/// An ordered list of mesh instances attached to one or more nodes.
///
/// Instance order is significant (it is the draw order for transparent
/// geometry) and is preserved by every operation except explicit
/// reassignment. Two groups are equal when name and instances match in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MeshGroup {
    name: String,
    mesh_instances: Vec<MeshInstance>,
}

impl MeshGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh_instances: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn add_mesh_instance(&mut self, instance: MeshInstance) {
        self.mesh_instances.push(instance);
    }

    #[inline]
    #[must_use]
    pub fn num_mesh_instances(&self) -> usize {
        self.mesh_instances.len()
    }

    #[must_use]
    pub fn mesh_instance(&self, index: usize) -> Option<&MeshInstance> {
        self.mesh_instances.get(index)
    }

    pub fn mesh_instance_mut(&mut self, index: usize) -> Option<&mut MeshInstance> {
        self.mesh_instances.get_mut(index)
    }

    pub fn mesh_instances(&self) -> &[MeshInstance] {
        &self.mesh_instances
    }

    pub fn mesh_instances_mut(&mut self) -> &mut [MeshInstance] {
        &mut self.mesh_instances
    }

    /// Removes every instance of `mesh_index`, keeping survivors in order.
    /// Passing `MeshIndex::INVALID` purges placeholders.
    pub fn remove_mesh_instances(&mut self, mesh_index: MeshIndex) {
        self.mesh_instances.retain(|i| i.mesh_index != mesh_index);
    }

    pub fn copy_from(&mut self, src: &MeshGroup) {
        self.clone_from(src);
    }
}

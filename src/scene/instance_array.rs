use crate::scene::transform::TrsMatrix;

/// Per-instance transforms for GPU instancing of a node's meshes.
///
/// Stored and carried through edits; not expanded by instance flattening.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceArray {
    instances: Vec<TrsMatrix>,
}

impl InstanceArray {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instance(&mut self, transform: TrsMatrix) -> usize {
        self.instances.push(transform);
        self.instances.len() - 1
    }

    #[must_use]
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn instance(&self, index: usize) -> Option<&TrsMatrix> {
        self.instances.get(index)
    }
}

//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`SceneError`] covers the failure modes of scene
//! editing and conversion:
//! - Out-of-range handles and material indices
//! - Precondition violations (removing a material that is still bound)
//! - Broken internal invariants (a node pointing at a missing mesh group)
//! - Mesh attribute problems found while converting or instantiating meshes
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, SceneError>`.
//!
//! ```rust,ignore
//! use mesh_scene::errors::Result;
//!
//! fn strip_material(scene: &mut Scene) -> Result<()> {
//!     scene.remove_material(0)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::scene::{MeshGroupIndex, MeshIndex};

/// The main error type for scene operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    // ========================================================================
    // Caller-facing precondition errors
    // ========================================================================
    /// An index was outside the owning sequence it addresses.
    #[error("Index out of range: {context} (index: {index})")]
    IndexOutOfRange {
        /// Description of what was being accessed
        context: &'static str,
        /// The offending index
        index: usize,
    },

    /// A material cannot be removed while a mesh instance still binds it.
    #[error("Material {material} is still used by mesh group {mesh_group}")]
    MaterialInUse {
        /// The material that was requested for removal
        material: usize,
        /// First mesh group found referencing it
        mesh_group: MeshGroupIndex,
    },

    /// The scene holds no base mesh for the requested index.
    #[error("Scene has no base mesh {0}")]
    MissingMesh(MeshIndex),

    // ========================================================================
    // Invariant violations
    // ========================================================================
    /// A mesh group lookup failed where the scene guarantees one exists.
    #[error("Mesh group {0} is missing")]
    MissingMeshGroup(MeshGroupIndex),

    /// Anything else that should be unreachable under a consistent scene.
    #[error("Internal error: {0}")]
    Internal(String),

    // ========================================================================
    // Mesh attribute errors
    // ========================================================================
    /// A required attribute is not present on the mesh.
    #[error("Mesh has no {0} attribute")]
    MissingAttribute(&'static str),

    /// An attribute is present but unusable.
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;

mod normals;
mod share;

pub use normals::compute_normals;
pub use share::{to_flat, to_shared};

use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::vertex::Vertex;

/// One independent object from the input stream: vertices in declaration
/// order plus triangle corner indices (always a multiple of 3).
///
/// The mesh is in *shared* form when vertices are reused across triangles
/// (`triangles.len() != vertices.len()`) and in *flat* form when every
/// triangle corner owns its vertex slot.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<u32>,
    pub(crate) has_normals: bool,
}

impl Mesh {
    pub(crate) fn from_parts(vertices: Vec<Vertex>, triangles: Vec<u32>, has_normals: bool) -> Self {
        Self {
            vertices,
            triangles,
            has_normals,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// Whether the vertices carry real normal data (from `vn` records or a
    /// [`compute_normals`] pass).
    pub fn has_normals(&self) -> bool {
        self.has_normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True when at least one vertex is referenced by more than one corner.
    pub fn is_shared(&self) -> bool {
        self.vertices.len() != self.triangles.len()
    }
}

/// The meshes produced by one parse, in stream order.
///
/// Built only during parsing; afterwards the collection structure is fixed
/// and only the post-processing passes replace a mesh's internal buffers.
#[derive(Debug, Default)]
pub struct MeshCollection {
    meshes: Vec<Mesh>,
}

impl MeshCollection {
    pub(crate) fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mesh> {
        self.meshes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Mesh> {
        self.meshes.iter_mut()
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn into_meshes(self) -> Vec<Mesh> {
        self.meshes
    }
}

impl<'a> IntoIterator for &'a MeshCollection {
    type Item = &'a Mesh;
    type IntoIter = std::slice::Iter<'a, Mesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.meshes.iter()
    }
}

impl IntoIterator for MeshCollection {
    type Item = Mesh;
    type IntoIter = std::vec::IntoIter<Mesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.meshes.into_iter()
    }
}

/// Failure of a post-processing pass. Always fatal to the mesh it hit:
/// the passes never hand back NaN or garbage geometry silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A vertex is referenced by zero triangles, so it has no face normals
    /// to average.
    OrphanVertex { vertex: usize },
    /// A triangle corner points outside the vertex buffer.
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::OrphanVertex { vertex } => {
                write!(f, "vertex {vertex} is not referenced by any triangle")
            }
            MeshError::IndexOutOfRange {
                index,
                vertex_count,
            } => {
                write!(
                    f,
                    "triangle index {index} is out of range (mesh has {vertex_count} vertices)"
                )
            }
        }
    }
}

impl Error for MeshError {}

use std::collections::HashMap;

use super::{Mesh, MeshError};
use crate::vertex::Vertex;

/// Converts a mesh to flat (unshared) form: every triangle corner gets its
/// own copy of the referenced vertex and the index buffer becomes the
/// identity (`triangles[i] == i`).
///
/// Flat form discards sharing topology but keeps all position/normal data.
/// A mesh that is already flat is left untouched, so the pass is
/// idempotent.
pub fn to_flat(mesh: &mut Mesh) -> Result<(), MeshError> {
    if !mesh.is_shared() {
        return Ok(());
    }

    let mut vertices = Vec::with_capacity(mesh.triangles.len());
    for &index in &mesh.triangles {
        let vertex = mesh
            .vertices
            .get(index as usize)
            .copied()
            .ok_or(MeshError::IndexOutOfRange {
                index,
                vertex_count: mesh.vertices.len(),
            })?;
        vertices.push(vertex);
    }

    mesh.vertices = vertices;
    for (slot, index) in mesh.triangles.iter_mut().enumerate() {
        *index = slot as u32;
    }
    log::debug!("mesh converted to unshared vertices");
    Ok(())
}

/// Converts a mesh to shared (indexed) form by merging vertices that are
/// bitwise-equal in both position and normal.
///
/// This is a real deduplication, not a renumbering: corners that reference
/// identical data end up pointing at one vertex record.
pub fn to_shared(mesh: &mut Mesh) -> Result<(), MeshError> {
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut triangles = Vec::with_capacity(mesh.triangles.len());
    let mut vertex_map: HashMap<Vertex, u32> = HashMap::new();

    for &index in &mesh.triangles {
        let vertex = mesh
            .vertices
            .get(index as usize)
            .copied()
            .ok_or(MeshError::IndexOutOfRange {
                index,
                vertex_count: mesh.vertices.len(),
            })?;
        let slot = *vertex_map.entry(vertex).or_insert_with(|| {
            let slot = vertices.len() as u32;
            vertices.push(vertex);
            slot
        });
        triangles.push(slot);
    }

    mesh.vertices = vertices;
    mesh.triangles = triangles;
    log::debug!("mesh converted to shared vertices");
    Ok(())
}

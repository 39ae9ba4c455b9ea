use glam::Vec3;

use super::{Mesh, MeshError};

/// Synthesizes per-vertex normals from the triangle winding.
///
/// Each triangle's face normal is the cross product of its edge vectors,
/// left unnormalized so its magnitude is proportional to the triangle area;
/// larger triangles therefore weigh more in the per-vertex average. Every
/// vertex receives the average of the face normals of the triangles that
/// reference it, normalized to unit length (degenerate geometry averages to
/// the zero vector rather than NaN).
pub fn compute_normals(mesh: &mut Mesh) -> Result<(), MeshError> {
    let vertex_count = mesh.vertices.len();
    let mut sums = vec![Vec3::ZERO; vertex_count];
    let mut shared = vec![0u32; vertex_count];

    for triangle in mesh.triangles.chunks_exact(3) {
        let corners = [triangle[0], triangle[1], triangle[2]];
        for &corner in &corners {
            if corner as usize >= vertex_count {
                return Err(MeshError::IndexOutOfRange {
                    index: corner,
                    vertex_count,
                });
            }
        }

        let a = mesh.vertices[corners[0] as usize].position;
        let b = mesh.vertices[corners[1] as usize].position;
        let c = mesh.vertices[corners[2] as usize].position;
        let face_normal = (b - a).cross(c - b);

        // A degenerate triangle that repeats a vertex still contributes to
        // it only once.
        for (slot, &corner) in corners.iter().enumerate() {
            if corners[..slot].contains(&corner) {
                continue;
            }
            sums[corner as usize] += face_normal;
            shared[corner as usize] += 1;
        }
    }

    for (index, vertex) in mesh.vertices.iter_mut().enumerate() {
        if shared[index] == 0 {
            return Err(MeshError::OrphanVertex { vertex: index });
        }
        vertex.normal = (sums[index] / shared[index] as f32).normalize_or_zero();
    }

    mesh.has_normals = true;
    Ok(())
}

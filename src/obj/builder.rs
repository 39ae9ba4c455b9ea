use std::mem;

use glam::Vec3;
use rs42::extensions::vec::TryPush;

use crate::mesh::{Mesh, MeshCollection};
use crate::vertex::Vertex;

use super::{ParseErrorKind, RecordIssue};

/// Where the builder is relative to an object boundary. Kept as an enum so
/// further boundary triggers (explicit `o`/`g` markers) can slot in without
/// boolean combinatorics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    #[default]
    Collecting,
    JustClosedFace,
}

/// Accumulates the vertex and triangle buffers of the mesh currently being
/// built and segments the stream into meshes.
///
/// The boundary rule: any vertex-data line that directly follows a face
/// line starts a new object, so the current buffers are flushed first. No
/// explicit "new object" marker is required.
#[derive(Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    triangles: Vec<u32>,
    normals_assigned: usize,
    has_uv: bool,
    has_normals: bool,
    state: BuilderState,
    meshes: Vec<Mesh>,
}

impl MeshBuilder {
    pub fn has_uv(&self) -> bool {
        self.has_uv
    }

    pub fn has_normals(&self) -> bool {
        self.has_normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Must be called for every vertex-data line (`v`, `vt`, `vn`) before
    /// the line itself is parsed, so a boundary closes the previous mesh
    /// and the line lands in the next one.
    pub fn note_vertex_line(&mut self) {
        if self.state == BuilderState::JustClosedFace {
            self.flush();
            self.state = BuilderState::Collecting;
        }
    }

    pub fn mark_has_uv(&mut self) {
        self.has_uv = true;
    }

    pub fn push_position(&mut self, position: Vec3) -> Result<(), ParseErrorKind> {
        self.vertices
            .try_push(Vertex::new(position))
            .map_err(ParseErrorKind::AllocationFailure)
    }

    /// Assigns a normal to the vertex at the running declaration position.
    /// The format convention is that `vn` records appear in the same order
    /// as their owning `v` records; a normal with no owning vertex is a
    /// malformed record.
    pub fn push_normal(&mut self, normal: Vec3) -> Result<(), ParseErrorKind> {
        let Some(vertex) = self.vertices.get_mut(self.normals_assigned) else {
            return Err(ParseErrorKind::MalformedRecord(
                RecordIssue::NormalWithoutPosition {
                    normals_assigned: self.normals_assigned,
                    vertex_count: self.vertices.len(),
                },
            ));
        };
        vertex.normal = normal;
        self.normals_assigned += 1;
        self.has_normals = true;
        Ok(())
    }

    pub fn push_triangle(&mut self, corners: [u32; 3]) -> Result<(), ParseErrorKind> {
        self.triangles
            .try_reserve(3)
            .map_err(ParseErrorKind::AllocationFailure)?;
        self.triangles.extend(corners);
        self.state = BuilderState::JustClosedFace;
        Ok(())
    }

    /// Moves the in-progress buffers into a finished mesh and resets the
    /// per-mesh flags, so the next object starts from a clean slate.
    fn flush(&mut self) {
        let vertices = mem::take(&mut self.vertices);
        let triangles = mem::take(&mut self.triangles);
        self.meshes
            .push(Mesh::from_parts(vertices, triangles, self.has_normals));
        self.normals_assigned = 0;
        self.has_uv = false;
        self.has_normals = false;
    }

    /// Flushes whatever remains (even empty buffers) as the final mesh.
    pub fn finish(mut self) -> MeshCollection {
        self.flush();
        MeshCollection::new(self.meshes)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vertex_after_face_starts_a_new_mesh() {
        let mut builder = MeshBuilder::default();
        for position in [Vec3::ZERO, Vec3::X, Vec3::Y] {
            builder.note_vertex_line();
            builder.push_position(position).unwrap();
        }
        builder.push_triangle([0, 1, 2]).unwrap();

        builder.note_vertex_line();
        builder.push_position(Vec3::Z).unwrap();

        let meshes = builder.finish();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes.meshes()[0].vertex_count(), 3);
        assert_eq!(meshes.meshes()[0].index_count(), 3);
        assert_eq!(meshes.meshes()[1].vertex_count(), 1);
        assert_eq!(meshes.meshes()[1].index_count(), 0);
    }

    #[test]
    fn per_mesh_flags_reset_at_the_boundary() {
        let mut builder = MeshBuilder::default();
        builder.note_vertex_line();
        builder.push_position(Vec3::ZERO).unwrap();
        builder.mark_has_uv();
        builder.push_normal(Vec3::Z).unwrap();
        builder.push_triangle([0, 0, 0]).unwrap();

        builder.note_vertex_line();
        assert!(!builder.has_uv());
        assert!(!builder.has_normals());
        builder.push_position(Vec3::X).unwrap();
        // The normals counter restarted with the new vertex buffer.
        builder.push_normal(Vec3::Y).unwrap();
        assert!(builder.has_normals());
    }

    #[test]
    fn normal_without_owning_vertex_is_malformed() {
        let mut builder = MeshBuilder::default();
        let err = builder.push_normal(Vec3::Z).unwrap_err();
        assert!(matches!(
            err,
            ParseErrorKind::MalformedRecord(RecordIssue::NormalWithoutPosition { .. })
        ));
    }

    #[test]
    fn empty_input_still_yields_one_mesh() {
        let meshes = MeshBuilder::default().finish();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes.meshes()[0].vertex_count(), 0);
    }
}

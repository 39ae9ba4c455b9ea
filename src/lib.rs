//! Streaming parser for the Wavefront OBJ geometry subset, plus the mesh
//! passes a viewer needs before upload: per-vertex normal synthesis and
//! conversion between shared (indexed) and flat (per-corner) vertex form.
//!
//! The parser tolerates missing optional attributes, resolves negative
//! (relative) face indices, splits quads into triangles, and segments a
//! stream into multiple meshes wherever vertex data follows face data. By
//! default it is permissive — bad lines are skipped and reported as
//! diagnostics — with a strict mode that fails on the first offence.
//!
//! ```no_run
//! use wavefront_mesh::{compute_normals, ObjParser, ParseOptions};
//!
//! let parser = ObjParser::new(ParseOptions::default());
//! let mut outcome = parser.parse_file("model.obj")?;
//! for mesh in outcome.meshes.iter_mut() {
//!     if !mesh.has_normals() {
//!         compute_normals(mesh)?;
//!     }
//!     println!("{} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod loader;
mod mesh;
mod obj;
mod vertex;

pub use loader::{load_in_background, CancelToken, LoadHandle};
pub use mesh::{compute_normals, to_flat, to_shared, Mesh, MeshCollection, MeshError};
pub use obj::{
    Diagnostic, ObjFile, ObjParser, ParseError, ParseErrorKind, ParseOptions, ParseOutcome,
    RecordIssue,
};
pub use vertex::Vertex;

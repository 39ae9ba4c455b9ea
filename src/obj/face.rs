mod corner;

use corner::{parse_corner, FaceGrammar};

use super::{builder::MeshBuilder, ParseErrorKind, RecordIssue};

/// Parses a face record and appends its triangles to the mesh under
/// construction.
///
/// A triangle face emits its corners as-is; a quad is split with a fan
/// anchored at the first corner, `(c1, c2, c3)` then `(c1, c3, c4)`. This
/// assumes a convex, planar quad and does not generalize to arbitrary
/// n-gons, so anything with more corners is rejected.
pub fn parse_face_line<'a>(
    components: &mut impl Iterator<Item = &'a str>,
    builder: &mut MeshBuilder,
) -> Result<(), ParseErrorKind> {
    let grammar = FaceGrammar::of(builder.has_uv(), builder.has_normals());
    let vertex_count = builder.vertex_count();

    let mut corners = [0u32; 4];
    let mut arity = 0usize;
    for component in components {
        if arity < corners.len() {
            corners[arity] = parse_corner(component, grammar, vertex_count)?;
        }
        arity += 1;
    }

    if arity > corners.len() {
        return Err(ParseErrorKind::UnsupportedFaceArity(arity));
    }
    if arity < 3 {
        return Err(ParseErrorKind::MalformedRecord(
            RecordIssue::NotEnoughCornersInFace,
        ));
    }

    builder.push_triangle([corners[0], corners[1], corners[2]])?;
    if arity == 4 {
        log::debug!("quad face split into two triangles");
        builder.push_triangle([corners[0], corners[2], corners[3]])?;
    }
    Ok(())
}

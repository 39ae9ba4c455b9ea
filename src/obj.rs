mod builder;
mod face;
mod line;
mod vertex;

use builder::MeshBuilder;
use face::parse_face_line;
use line::{classify, LineKind, VertexKind};
use vertex::{parse_normal_line, parse_position_line};

use std::{
    collections::TryReserveError,
    error::Error,
    fmt::{self, Debug, Display},
    fs::File,
    io::{self, BufRead, BufReader, Read},
    num::{ParseFloatError, ParseIntError},
};

use crate::loader::CancelToken;
use crate::mesh::{Mesh, MeshCollection};

/// Path to a Wavefront OBJ file.
pub struct ObjFile<'a>(pub &'a str);

/// How the parser reacts to bad lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Fail on the first offending line instead of skipping it and
    /// recording a diagnostic.
    pub strict: bool,
}

/// A line the permissive parser skipped, with why.
#[derive(Debug)]
pub struct Diagnostic {
    /// 1-based line number; 0 for stream-level diagnostics.
    pub line_number: usize,
    pub content: String,
    pub kind: ParseErrorKind,
}

/// Everything one parse produced: the meshes plus the diagnostics for any
/// lines that were skipped along the way.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub meshes: MeshCollection,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ParseError {
    line: Option<(usize, String)>,
    kind: ParseErrorKind,
}

#[derive(Debug)]
pub enum ParseErrorKind {
    FailedToOpenFile(io::Error),
    FailedToReadFile(io::Error),
    AllocationFailure(TryReserveError),

    /// A vertex or face record does not match its expected shape.
    MalformedRecord(RecordIssue),
    /// A face with more than 4 corners; fan triangulation of arbitrary
    /// n-gons is not supported.
    UnsupportedFaceArity(usize),
    /// A resolved face index falls outside the declared vertex buffer.
    IndexOutOfRange { index: i64, vertex_count: usize },
    /// The whole stream declared no vertex at all.
    EmptyInput,
    /// The parse was cancelled through its [`CancelToken`].
    Cancelled,
}

#[derive(Debug)]
pub enum RecordIssue {
    NotEnoughComponents,
    TooManyComponents,
    InvalidFloatComponent(ParseFloatError),
    NormalWithoutPosition {
        normals_assigned: usize,
        vertex_count: usize,
    },
    NotEnoughCornersInFace,
    NotEnoughPartsInCorner,
    TooManyPartsInCorner,
    UnexpectedPartInCorner,
    InvalidIndex(ParseIntError),
    IndexCanNotBe0,
}

impl ParseError {
    fn new(line: Option<(usize, String)>, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn line(&self) -> Option<(usize, &str)> {
        self.line
            .as_ref()
            .map(|(number, content)| (*number, content.as_str()))
    }
}

impl Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line.as_ref() {
            return write!(
                f,
                "ParseError {{\n\tline: {}\n\tline_content: \"{}\"\n\tkind: {:?}\n}}",
                line.0, line.1, self.kind,
            );
        }
        write!(f, "ParseError({:?})", self.kind)
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for ParseError {}

/// Streaming parser for the line-oriented OBJ geometry subset: `v`, `vt`
/// (recognized, not stored), `vn`, `f`, blank lines, and everything else
/// ignored.
#[derive(Default)]
pub struct ObjParser {
    options: ParseOptions,
    cancel: CancelToken,
}

impl ObjParser {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Token callers can hold on to and trip from another thread; the
    /// parser checks it once per line.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn parse_file(&self, path: &str) -> Result<ParseOutcome, ParseError> {
        let file = File::open(path)
            .map_err(|err| ParseError::new(None, ParseErrorKind::FailedToOpenFile(err)))?;
        self.parse(BufReader::new(file))
    }

    pub fn parse<R: Read>(&self, reader: BufReader<R>) -> Result<ParseOutcome, ParseError> {
        let mut builder = MeshBuilder::default();
        let mut diagnostics = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line
                .map_err(|err| ParseError::new(None, ParseErrorKind::FailedToReadFile(err)))?;

            if self.cancel.is_cancelled() {
                return Err(ParseError::new(
                    Some((line_number, line)),
                    ParseErrorKind::Cancelled,
                ));
            }

            if let Err(kind) = parse_line(&line, &mut builder) {
                if self.options.strict || is_fatal(&kind) {
                    return Err(ParseError::new(Some((line_number, line)), kind));
                }
                log::warn!("skipping line {line_number} ({kind:?}): {line}");
                diagnostics.push(Diagnostic {
                    line_number,
                    content: line,
                    kind,
                });
            }
        }

        let meshes = builder.finish();
        if meshes.iter().map(Mesh::vertex_count).sum::<usize>() == 0 {
            if self.options.strict {
                return Err(ParseError::new(None, ParseErrorKind::EmptyInput));
            }
            log::warn!("input contained no vertex data");
            diagnostics.push(Diagnostic {
                line_number: 0,
                content: String::new(),
                kind: ParseErrorKind::EmptyInput,
            });
        }

        Ok(ParseOutcome {
            meshes,
            diagnostics,
        })
    }
}

/// Errors no amount of skipping can recover from.
fn is_fatal(kind: &ParseErrorKind) -> bool {
    matches!(
        kind,
        ParseErrorKind::FailedToOpenFile(_)
            | ParseErrorKind::FailedToReadFile(_)
            | ParseErrorKind::AllocationFailure(_)
            | ParseErrorKind::Cancelled
    )
}

fn parse_line(line: &str, builder: &mut MeshBuilder) -> Result<(), ParseErrorKind> {
    let mut components = line.split(' ').filter(|str| !str.is_empty());

    match classify(components.next()) {
        LineKind::Blank | LineKind::Other => Ok(()),
        LineKind::Vertex(kind) => {
            // A vertex-data line directly after a face line is an object
            // boundary; close the previous mesh before this line lands.
            builder.note_vertex_line();
            match kind {
                VertexKind::Position => parse_position_line(&mut components, builder),
                VertexKind::Texture => {
                    // Texture coordinates are out of scope; the line only
                    // switches the face grammar for this mesh.
                    builder.mark_has_uv();
                    Ok(())
                }
                VertexKind::Normal => parse_normal_line(&mut components, builder),
            }
        }
        LineKind::Face => parse_face_line(&mut components, builder),
    }
}

/// Default-options convenience: parse a file into just its meshes.
impl TryFrom<ObjFile<'_>> for MeshCollection {
    type Error = ParseError;

    fn try_from(file: ObjFile) -> Result<Self, ParseError> {
        ObjParser::new(ParseOptions::default())
            .parse_file(file.0)
            .map(|outcome| outcome.meshes)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use glam::Vec3;

    fn parse_str(input: &str, options: ParseOptions) -> Result<ParseOutcome, ParseError> {
        ObjParser::new(options).parse(BufReader::new(input.as_bytes()))
    }

    fn parse_default(input: &str) -> ParseOutcome {
        parse_str(input, ParseOptions::default()).unwrap()
    }

    #[test]
    fn triangle_only_input_is_well_formed() {
        let outcome = parse_default(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 3\nf 2 4 3\n",
        );
        assert_eq!(outcome.meshes.len(), 1);
        let mesh = &outcome.meshes.meshes()[0];
        assert_eq!(mesh.index_count() % 3, 0);
        for &index in mesh.triangles() {
            assert!((index as usize) < mesh.vertex_count());
        }
    }

    #[test]
    fn quad_face_fans_from_the_first_corner() {
        let outcome = parse_default("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
        assert_eq!(
            outcome.meshes.meshes()[0].triangles(),
            &[0, 1, 2, 0, 2, 3]
        );
    }

    #[test]
    fn negative_index_means_most_recent_vertex() {
        let outcome =
            parse_default("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nv 2 2 2\nf 1 2 -1\n");
        assert_eq!(outcome.meshes.meshes()[0].triangles(), &[0, 1, 4]);
    }

    #[test]
    fn vertex_after_face_splits_the_stream_into_two_meshes() {
        let outcome = parse_default(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 1 2 3\n",
        );
        assert_eq!(outcome.meshes.len(), 2);
        for mesh in &outcome.meshes {
            assert_eq!(mesh.vertex_count(), 3);
            assert_eq!(mesh.triangles(), &[0, 1, 2]);
        }
    }

    #[test]
    fn texture_only_input_yields_a_single_empty_mesh() {
        let outcome = parse_default("vt 0.5 0.5\nvt 0.25 0.75\n");
        assert_eq!(outcome.meshes.len(), 1);
        let mesh = &outcome.meshes.meshes()[0];
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.index_count(), 0);
        assert!(outcome
            .diagnostics
            .iter()
            .any(|d| matches!(d.kind, ParseErrorKind::EmptyInput)));
    }

    #[test]
    fn empty_input_fails_in_strict_mode() {
        let err = parse_str("# nothing here\n", ParseOptions { strict: true }).unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::EmptyInput));
    }

    #[test]
    fn face_index_beyond_vertex_count_is_out_of_range() {
        let err = parse_str("v 0 0 0\nf 1 2 3\n", ParseOptions { strict: true }).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::IndexOutOfRange {
                index: 1,
                vertex_count: 1
            }
        ));
        assert_eq!(err.line(), Some((2, "f 1 2 3")));
    }

    #[test]
    fn permissive_mode_skips_bad_lines_and_keeps_parsing() {
        let outcome = parse_default("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\nf 1 2 3\n");
        let mesh = &outcome.meshes.meshes()[0];
        assert_eq!(mesh.triangles(), &[0, 1, 2]);
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].line_number, 4);
        assert!(matches!(
            outcome.diagnostics[0].kind,
            ParseErrorKind::IndexOutOfRange { .. }
        ));
    }

    #[test]
    fn strict_mode_fails_on_the_first_malformed_record() {
        let err = parse_str("v 0 0\n", ParseOptions { strict: true }).unwrap_err();
        assert!(matches!(
            err.kind(),
            ParseErrorKind::MalformedRecord(RecordIssue::NotEnoughComponents)
        ));
        assert_eq!(err.line(), Some((1, "v 0 0")));
    }

    #[test]
    fn normals_are_parsed_alongside_positions() {
        let outcome = parse_default(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvn 0 0 1\nvn 0 0 1\nf 1//1 2//2 3//3\n",
        );
        let mesh = &outcome.meshes.meshes()[0];
        assert!(mesh.has_normals());
        for vertex in mesh.vertices() {
            assert_eq!(vertex.normal, Vec3::Z);
        }
        assert_eq!(mesh.triangles(), &[0, 1, 2]);
    }

    #[test]
    fn uv_and_normal_grammar_is_accepted() {
        let outcome = parse_default(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nvn 0 0 1\nvn 0 0 1\nf 1/1/1 2/2/2 3/3/3\n",
        );
        assert_eq!(outcome.meshes.meshes()[0].triangles(), &[0, 1, 2]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn cancelled_parse_reports_cancellation() {
        let parser = ObjParser::new(ParseOptions::default());
        parser.cancel_token().cancel();
        let err = parser
            .parse(BufReader::new("v 0 0 0\n".as_bytes()))
            .unwrap_err();
        assert!(matches!(err.kind(), ParseErrorKind::Cancelled));
    }

    #[test]
    fn comments_groups_and_blanks_are_ignored() {
        let outcome = parse_default(
            "# teapot\n\ng body\nusemtl steel\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );
        assert_eq!(outcome.meshes.len(), 1);
        assert_eq!(outcome.meshes.meshes()[0].vertex_count(), 3);
        assert!(outcome.diagnostics.is_empty());
    }
}

/// What a line contributes to the mesh, judged from its leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `v`, `vt` or `vn` — vertex data for the mesh under construction.
    Vertex(VertexKind),
    /// `f` — a face record.
    Face,
    /// Nothing but whitespace.
    Blank,
    /// Comments, groups, materials and the rest; consumed and ignored.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    Position,
    Texture,
    Normal,
}

/// Classifies a line from its first whitespace-separated token. The exact
/// token match is what tells `v` from `vt` and `vn` apart.
pub fn classify(first_token: Option<&str>) -> LineKind {
    match first_token {
        None => LineKind::Blank,
        Some("v") => LineKind::Vertex(VertexKind::Position),
        Some("vt") => LineKind::Vertex(VertexKind::Texture),
        Some("vn") => LineKind::Vertex(VertexKind::Normal),
        Some("f") => LineKind::Face,
        Some(_) => LineKind::Other,
    }
}

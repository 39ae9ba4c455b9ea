use super::super::{ParseErrorKind, RecordIssue};

/// The shape every corner record of the current mesh must have, decided by
/// which vertex attributes earlier lines declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceGrammar {
    /// `f a b c`
    Position,
    /// `f a/ta b/tb c/tc`
    PositionUv,
    /// `f a//na b//nb c//nc`
    PositionNormal,
    /// `f a/ta/na b/tb/nb c/tc/nc`
    PositionUvNormal,
}

impl FaceGrammar {
    pub fn of(has_uv: bool, has_normals: bool) -> Self {
        match (has_uv, has_normals) {
            (false, false) => FaceGrammar::Position,
            (true, false) => FaceGrammar::PositionUv,
            (false, true) => FaceGrammar::PositionNormal,
            (true, true) => FaceGrammar::PositionUvNormal,
        }
    }
}

/// Parses one corner record (`a`, `a/t`, `a//n` or `a/t/n`) and returns the
/// resolved 0-based vertex index.
///
/// Texture and normal sub-indices are parsed to keep the scanner aligned
/// with the grammar but never retained.
pub fn parse_corner(
    text: &str,
    grammar: FaceGrammar,
    vertex_count: usize,
) -> Result<u32, ParseErrorKind> {
    let mut parts = text.split('/');
    let index = resolve_index(parts.next().unwrap_or(""), vertex_count)?;

    match grammar {
        FaceGrammar::Position => {}
        FaceGrammar::PositionUv => {
            parse_sub_index(parts.next())?;
        }
        FaceGrammar::PositionNormal => {
            expect_empty(parts.next())?;
            parse_sub_index(parts.next())?;
        }
        FaceGrammar::PositionUvNormal => {
            parse_sub_index(parts.next())?;
            parse_sub_index(parts.next())?;
        }
    }

    if parts.next().is_some() {
        return Err(ParseErrorKind::MalformedRecord(
            RecordIssue::TooManyPartsInCorner,
        ));
    }
    Ok(index)
}

/// Face indices are 1-based; negative indices count backwards from the most
/// recently declared vertex, so `-1` is the newest one.
fn resolve_index(text: &str, vertex_count: usize) -> Result<u32, ParseErrorKind> {
    let raw = text
        .parse::<i64>()
        .map_err(|err| ParseErrorKind::MalformedRecord(RecordIssue::InvalidIndex(err)))?;
    if raw == 0 {
        return Err(ParseErrorKind::MalformedRecord(RecordIssue::IndexCanNotBe0));
    }

    let resolved = if raw < 0 {
        raw + vertex_count as i64
    } else {
        raw - 1
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        return Err(ParseErrorKind::IndexOutOfRange {
            index: resolved,
            vertex_count,
        });
    }
    Ok(resolved as u32)
}

fn parse_sub_index(part: Option<&str>) -> Result<(), ParseErrorKind> {
    part.ok_or(ParseErrorKind::MalformedRecord(
        RecordIssue::NotEnoughPartsInCorner,
    ))?
    .parse::<i64>()
    .map_err(|err| ParseErrorKind::MalformedRecord(RecordIssue::InvalidIndex(err)))?;
    Ok(())
}

fn expect_empty(part: Option<&str>) -> Result<(), ParseErrorKind> {
    let text = part.ok_or(ParseErrorKind::MalformedRecord(
        RecordIssue::NotEnoughPartsInCorner,
    ))?;
    if !text.is_empty() {
        return Err(ParseErrorKind::MalformedRecord(
            RecordIssue::UnexpectedPartInCorner,
        ));
    }
    Ok(())
}

use glam::Vec3;
use rs42::extensions::PipeLine;

use super::{builder::MeshBuilder, ParseErrorKind, RecordIssue};

/// Parses a `v x y z` record and appends a new vertex (with no normal yet)
/// to the mesh under construction.
pub fn parse_position_line<'a>(
    components: &mut impl Iterator<Item = &'a str>,
    builder: &mut MeshBuilder,
) -> Result<(), ParseErrorKind> {
    parse_vec3(components)?.pipe(|position| builder.push_position(position))
}

/// Parses a `vn x y z` record and assigns it to the vertex at the running
/// declaration position (see [`MeshBuilder::push_normal`]).
pub fn parse_normal_line<'a>(
    components: &mut impl Iterator<Item = &'a str>,
    builder: &mut MeshBuilder,
) -> Result<(), ParseErrorKind> {
    parse_vec3(components)?.pipe(|normal| builder.push_normal(normal))
}

fn parse_vec3<'a>(
    components: &mut impl Iterator<Item = &'a str>,
) -> Result<Vec3, ParseErrorKind> {
    let mut values = [0.0f32; 3];
    for value in values.iter_mut() {
        *value = components
            .next()
            .ok_or(ParseErrorKind::MalformedRecord(
                RecordIssue::NotEnoughComponents,
            ))?
            .parse::<f32>()
            .map_err(|err| {
                ParseErrorKind::MalformedRecord(RecordIssue::InvalidFloatComponent(err))
            })?;
    }

    if components.next().is_some() {
        return Err(ParseErrorKind::MalformedRecord(
            RecordIssue::TooManyComponents,
        ));
    }
    Vec3::from_array(values).pipe(Ok)
}

use glam::Vec3;

/// A mesh vertex: a position and a normal slot.
///
/// Whether the normal slot holds real data is tracked per-mesh (see
/// [`Mesh::has_normals`](crate::Mesh::has_normals)), since an OBJ stream may
/// omit normals entirely and they are synthesized later if needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
        }
    }

    pub fn with_normal(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    fn into_tuple_of_bits(self) -> ([u32; 3], [u32; 3]) {
        (
            self.position.to_array().map(f32::to_bits),
            self.normal.to_array().map(f32::to_bits),
        )
    }
}

// Equality and hashing go through the bit patterns so vertices can key a
// HashMap during deduplication. NaN == NaN and 0.0 != -0.0 here, which is
// what exact-merge semantics want.

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.into_tuple_of_bits().hash(state)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.into_tuple_of_bits().eq(&other.into_tuple_of_bits())
    }
}

impl Eq for Vertex {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bitwise_equality_distinguishes_normals() {
        let a = Vertex::with_normal(Vec3::X, Vec3::Y);
        let b = Vertex::with_normal(Vec3::X, Vec3::Z);
        assert_eq!(a, a);
        assert_ne!(a, b);
    }

    #[test]
    fn negative_zero_is_a_distinct_vertex() {
        let a = Vertex::new(Vec3::new(0.0, 0.0, 0.0));
        let b = Vertex::new(Vec3::new(-0.0, 0.0, 0.0));
        assert_ne!(a, b);
    }
}

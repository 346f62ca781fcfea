/// SIMD-accelerated `glam` types used for all CPU-side geometry.
///
/// This module re-exports the [`glam`] crate. Glyph outlines, contours and
/// extruded meshes are all built from these types.
///
/// ```
/// use glyphmesh_core::math::{Vec2, Vec3};
///
/// let pen = Vec2::new(0.5, 0.0);
/// let lifted = pen.extend(0.25);
/// assert_eq!(lifted, Vec3::new(0.5, 0.0, 0.25));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for vertex buffers.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so slices of them can be
/// handed to a GPU upload as raw bytes with [`bytemuck::cast_slice`].
///
/// ```
/// use glyphmesh_core::math::PackedVec3;
///
/// let corners = [PackedVec3::new(0.0, 0.0, 0.0), PackedVec3::new(1.0, 0.0, 0.0)];
/// let bytes: &[u8] = bytemuck::cast_slice(&corners);
/// assert_eq!(bytes.len(), 24);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};
    use static_assertions::const_assert_eq;

    /// A 3D vector with guaranteed `#[repr(C)]` layout.
    ///
    /// ```text
    /// Offset | Field | Size
    /// -------|-------|------
    /// 0      | x     | 4 bytes (f32)
    /// 4      | y     | 4 bytes (f32)
    /// 8      | z     | 4 bytes (f32)
    /// Total: 12 bytes
    /// ```
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    impl Vec3 {
        pub const fn new(x: f32, y: f32, z: f32) -> Self {
            Self { x, y, z }
        }

        pub fn to_array(self) -> [f32; 3] {
            [self.x, self.y, self.z]
        }
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self {
                x: v.x,
                y: v.y,
                z: v.z,
            }
        }
    }

    impl From<Vec3> for glam::Vec3 {
        fn from(v: Vec3) -> Self {
            glam::Vec3::new(v.x, v.y, v.z)
        }
    }

    const_assert_eq!(std::mem::size_of::<Vec3>(), 12);
}

pub use fast::*;
pub use packed::Vec3 as PackedVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_round_trip() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let packed = PackedVec3::from(v);
        assert_eq!(Vec3::from(packed), v);
    }
}

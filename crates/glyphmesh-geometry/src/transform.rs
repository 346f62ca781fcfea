//! 2D affine transformations.
//!
//! Glyph outlines are placed with a transform built from the style: font
//! units are scaled to em, then sheared to slant the text.

use glam::{Mat3, Vec2, Vec3};

/// A 2D affine transformation matrix.
///
/// Internally uses a 3x3 matrix for affine transforms.
/// The last row is always [0, 0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    matrix: Mat3,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// Identity transform (no transformation).
    pub const IDENTITY: Self = Self {
        matrix: Mat3::IDENTITY,
    };

    /// Create a translation transform.
    pub fn translate(offset: Vec2) -> Self {
        Self {
            matrix: Mat3::from_translation(offset),
        }
    }

    /// Create a uniform scale transform.
    pub fn scale(factor: f32) -> Self {
        Self {
            matrix: Mat3::from_scale(Vec2::splat(factor)),
        }
    }

    /// Create a horizontal shear: `x' = x + factor * y`.
    ///
    /// `factor` is the slant itself, not an angle.
    pub fn shear(factor: f32) -> Self {
        Self {
            matrix: Mat3::from_cols(
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(factor, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ),
        }
    }

    /// Combine two transforms (self then other).
    pub fn then(&self, other: &Transform2D) -> Self {
        Self {
            matrix: other.matrix * self.matrix,
        }
    }

    /// Add a translation after this transform.
    pub fn then_translate(&self, offset: Vec2) -> Self {
        self.then(&Transform2D::translate(offset))
    }

    /// Add a uniform scale after this transform.
    pub fn then_scale(&self, factor: f32) -> Self {
        self.then(&Transform2D::scale(factor))
    }

    /// Add a shear after this transform.
    pub fn then_shear(&self, factor: f32) -> Self {
        self.then(&Transform2D::shear(factor))
    }

    /// Transform a point.
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        self.matrix.transform_point2(point)
    }
}

impl std::ops::Mul<Vec2> for Transform2D {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        self.transform_point(rhs)
    }
}

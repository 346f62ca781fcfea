//! Bezier curve primitives.
//!
//! Glyph outlines are made of quadratic (TrueType) and cubic (CFF) segments.
//! Both are flattened by uniform subdivision so that a fixed `resolution`
//! gives the same number of points per segment regardless of its length.

use glam::Vec2;

/// A quadratic Bezier curve (one control point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    /// Start point
    pub from: Vec2,
    /// Control point
    pub control: Vec2,
    /// End point
    pub to: Vec2,
}

impl QuadraticBezier {
    /// Create a new quadratic Bezier curve.
    pub fn new(from: Vec2, control: Vec2, to: Vec2) -> Self {
        Self { from, control, to }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        self.from * (mt * mt) + self.control * (2.0 * mt * t) + self.to * (t * t)
    }

    /// Push `segments` points sampled along the curve, excluding `from` and
    /// ending exactly on `to`.
    pub fn flatten_into(&self, segments: u32, out: &mut Vec<Vec2>) {
        let segments = segments.max(1);
        for i in 1..segments {
            out.push(self.eval(i as f32 / segments as f32));
        }
        out.push(self.to);
    }
}

/// A cubic Bezier curve (two control points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point
    pub from: Vec2,
    /// First control point
    pub control1: Vec2,
    /// Second control point
    pub control2: Vec2,
    /// End point
    pub to: Vec2,
}

impl CubicBezier {
    /// Create a new cubic Bezier curve.
    pub fn new(from: Vec2, control1: Vec2, control2: Vec2, to: Vec2) -> Self {
        Self {
            from,
            control1,
            control2,
            to,
        }
    }

    /// Evaluate the curve at parameter t (0.0 to 1.0).
    pub fn eval(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;

        self.from * (mt2 * mt)
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.to * (t2 * t)
    }

    /// See [`QuadraticBezier::flatten_into`].
    pub fn flatten_into(&self, segments: u32, out: &mut Vec<Vec2>) {
        let segments = segments.max(1);
        for i in 1..segments {
            out.push(self.eval(i as f32 / segments as f32));
        }
        out.push(self.to);
    }
}

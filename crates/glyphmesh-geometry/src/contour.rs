//! Flattened closed contours.
//!
//! A [`Contour`] is a closed polyline without a repeated closing point. Paths
//! are flattened into contours with a fixed number of subdivisions per curve,
//! and contours can be offset along their miter normals to thin or fatten an
//! outline.

use crate::{CubicBezier, Path, PathCommand, QuadraticBezier};
use glam::Vec2;

/// Points closer than this are merged while flattening.
const MERGE_EPSILON: f32 = 1e-6;

/// Miter length limit, as a multiple of the offset distance.
const MITER_LIMIT: f32 = 4.0;

/// Winding of a contour in y-up space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
}

/// A closed polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    points: Vec<Vec2>,
}

impl Contour {
    /// Build a contour, dropping consecutive duplicates and a repeated
    /// closing point.
    pub fn new(points: Vec<Vec2>) -> Self {
        let mut cleaned: Vec<Vec2> = Vec::with_capacity(points.len());
        for point in points {
            if cleaned
                .last()
                .is_none_or(|last| last.distance_squared(point) > MERGE_EPSILON * MERGE_EPSILON)
            {
                cleaned.push(point);
            }
        }
        while cleaned.len() > 1
            && cleaned[0].distance_squared(cleaned[cleaned.len() - 1])
                <= MERGE_EPSILON * MERGE_EPSILON
        {
            cleaned.pop();
        }
        Self { points: cleaned }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A contour needs three points to enclose any area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    /// Signed area via the shoelace formula. Positive for counter-clockwise.
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        let mut twice_area = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice_area += a.perp_dot(b);
        }
        twice_area * 0.5
    }

    pub fn orientation(&self) -> Orientation {
        if self.signed_area() >= 0.0 {
            Orientation::CounterClockwise
        } else {
            Orientation::Clockwise
        }
    }

    /// Move every point by `distance` along its miter normal.
    ///
    /// The normal points to the right of the direction of travel when
    /// `outward` is [`Orientation::CounterClockwise`] and to the left
    /// otherwise, so with the orientation of a glyph's outer contour a
    /// positive distance fattens the whole glyph (holes shrink). The point
    /// count is preserved, which keeps rings of an extrusion aligned.
    pub fn offset(&self, distance: f32, outward: Orientation) -> Contour {
        if distance == 0.0 || self.is_degenerate() {
            return self.clone();
        }

        let side = match outward {
            Orientation::CounterClockwise => 1.0,
            Orientation::Clockwise => -1.0,
        };
        let n = self.points.len();
        let max_miter = MITER_LIMIT * distance.abs();

        let points = (0..n)
            .map(|i| {
                let prev = self.points[(i + n - 1) % n];
                let current = self.points[i];
                let next = self.points[(i + 1) % n];

                let n1 = right_normal(current - prev) * side;
                let n2 = right_normal(next - current) * side;
                let bisector = (n1 + n2).normalize_or_zero();

                if bisector == Vec2::ZERO {
                    // Edge folds back onto itself.
                    return current + n1 * distance;
                }

                let cos_half = bisector.dot(n1).max(1e-3);
                let miter = (distance / cos_half).clamp(-max_miter, max_miter);
                current + bisector * miter
            })
            .collect();

        Contour { points }
    }
}

fn right_normal(direction: Vec2) -> Vec2 {
    let d = direction.normalize_or_zero();
    Vec2::new(d.y, -d.x)
}

/// Flatten a path into closed contours.
///
/// Every curve segment becomes `resolution` line segments (at least one).
/// Open sub-paths are closed implicitly; degenerate contours are dropped.
pub fn flatten_path(path: &Path, resolution: u32) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut pen = Vec2::ZERO;

    let flush = |points: &mut Vec<Vec2>, contours: &mut Vec<Contour>| {
        if points.is_empty() {
            return;
        }
        let contour = Contour::new(std::mem::take(points));
        if !contour.is_degenerate() {
            contours.push(contour);
        }
    };

    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(to) => {
                flush(&mut current, &mut contours);
                current.push(to);
                pen = to;
            }
            PathCommand::LineTo(to) => {
                if current.is_empty() {
                    current.push(pen);
                }
                current.push(to);
                pen = to;
            }
            PathCommand::QuadTo { control, to } => {
                if current.is_empty() {
                    current.push(pen);
                }
                QuadraticBezier::new(pen, control, to).flatten_into(resolution, &mut current);
                pen = to;
            }
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => {
                if current.is_empty() {
                    current.push(pen);
                }
                CubicBezier::new(pen, control1, control2, to)
                    .flatten_into(resolution, &mut current);
                pen = to;
            }
            PathCommand::Close => {
                if let Some(first) = current.first() {
                    pen = *first;
                }
                flush(&mut current, &mut contours);
            }
        }
    }
    flush(&mut current, &mut contours);

    contours
}

/// The orientation of the contour with the largest absolute area.
///
/// Fonts use one winding for outer contours and the opposite for holes; the
/// largest contour is always an outer one.
pub fn outer_orientation(contours: &[Contour]) -> Orientation {
    contours
        .iter()
        .map(Contour::signed_area)
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .map_or(Orientation::CounterClockwise, |area| {
            if area >= 0.0 {
                Orientation::CounterClockwise
            } else {
                Orientation::Clockwise
            }
        })
}

/// Offset every contour consistently with the outline's outer orientation.
pub fn offset_contours(contours: &[Contour], distance: f32) -> Vec<Contour> {
    let outward = outer_orientation(contours);
    contours
        .iter()
        .map(|contour| contour.offset(distance, outward))
        .collect()
}

//! Extrusion of flat outlines into 3D glyph meshes.
//!
//! The outline is swept along z through a profile of rings. Each ring is the
//! outline offset outward by some distance and placed at some depth:
//!
//! ```text
//!   z
//!   ^   front cap (delta 0, z = depth + bevel)
//!   |    \___ quarter arc, bevel_resolution + 1 segments
//!   |        | (delta bevel, z = depth)
//!   |        | straight wall
//!   |        | (delta bevel, z = -depth)
//!   |    ___/
//!   |   back cap (delta 0, z = -(depth + bevel))
//! ```
//!
//! Caps are triangles; the walls between rings are quads.

use crate::{Contour, FillRule, Orientation, PolygonMesh, Tessellator, contour::outer_orientation};
use glam::Vec2;
use glyphmesh_core::profiling::profile_function;
use std::f32::consts::FRAC_PI_2;

/// Depth parameters of an extrusion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExtrudeOptions {
    /// Half-depth of the straight wall. Zero means flat.
    pub depth: f32,
    /// Outward size of the rounded edge.
    pub bevel_depth: f32,
    /// Extra segments on the rounded edge. Zero is a single chamfer.
    pub bevel_resolution: u32,
}

impl ExtrudeOptions {
    /// Whether the result is a single flat cap.
    pub fn is_flat(&self) -> bool {
        self.depth == 0.0 && self.bevel_depth == 0.0
    }

    /// The `(delta, z)` rings from front cap to back cap.
    pub fn profile(&self) -> Vec<Vec2> {
        let depth = self.depth;
        let bevel = self.bevel_depth;

        let mut rings: Vec<Vec2> = Vec::new();
        let mut push = |ring: Vec2| {
            if rings.last() != Some(&ring) {
                rings.push(ring);
            }
        };

        if bevel == 0.0 {
            push(Vec2::new(0.0, depth));
            push(Vec2::new(0.0, -depth));
            return rings;
        }

        let steps = self.bevel_resolution + 1;
        // Endpoints are exact so the front and back arcs meet on one ring.
        let arc = |k: u32| {
            if k == steps {
                return Vec2::new(bevel, 0.0);
            }
            let theta = k as f32 / steps as f32 * FRAC_PI_2;
            Vec2::new(bevel * theta.sin(), bevel * theta.cos())
        };

        for k in 0..=steps {
            let p = arc(k);
            push(Vec2::new(p.x, depth + p.y));
        }
        for k in (0..=steps).rev() {
            let p = arc(k);
            push(Vec2::new(p.x, -(depth + p.y)));
        }
        rings
    }
}

/// Build the 3D mesh of an outline.
///
/// Flat options give one cap at z = 0. Otherwise the front cap faces +z, the
/// back cap faces -z, and the walls face away from the glyph's interior.
pub fn extrude_contours(
    contours: &[Contour],
    options: &ExtrudeOptions,
    tessellator: &mut Tessellator,
) -> PolygonMesh {
    profile_function!();

    let contours: Vec<Contour> = contours
        .iter()
        .filter(|c| !c.is_degenerate())
        .cloned()
        .collect();

    let mut mesh = PolygonMesh::new();
    if contours.is_empty() {
        return mesh;
    }

    let cap = tessellator.tessellate_contours(&contours, FillRule::NonZero);

    if options.is_flat() {
        mesh.add_tessellated(&cap, 0.0, false);
        return mesh;
    }

    let front = options.depth + options.bevel_depth;
    mesh.add_tessellated(&cap, front, false);
    mesh.add_tessellated(&cap, -front, true);

    let outward = outer_orientation(&contours);
    let profile = options.profile();

    for contour in &contours {
        let rings: Vec<Vec<u32>> = profile
            .iter()
            .map(|ring| {
                contour
                    .offset(ring.x, outward)
                    .points()
                    .iter()
                    .map(|p| mesh.add_vertex(p.extend(ring.y)))
                    .collect()
            })
            .collect();

        for pair in rings.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            let n = upper.len();
            for i in 0..n {
                let j = (i + 1) % n;
                match outward {
                    Orientation::CounterClockwise => {
                        mesh.add_polygon([upper[i], lower[i], lower[j], upper[j]])
                    }
                    Orientation::Clockwise => {
                        mesh.add_polygon([upper[i], upper[j], lower[j], lower[i]])
                    }
                }
            }
        }
    }

    mesh
}

//! Contour tessellation using Lyon.
//!
//! Converts flattened glyph contours into triangle meshes for the caps of a
//! glyph mesh.

use crate::{
    Contour,
    vertex::{FillVertex, TessellatedMesh},
};
use lyon::lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex as LyonFillVertex, VertexBuffers,
};
use lyon::math::point;
use lyon::path::PathEvent;

/// Fill rule for overlapping contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Font outlines rely on non-zero winding.
    #[default]
    NonZero,
    EvenOdd,
}

/// Tessellator for converting contours to triangle meshes.
pub struct Tessellator {
    fill_tessellator: FillTessellator,
    /// Tolerance for curve flattening. Contours are already polylines, so
    /// this only matters for lyon's internal intersection handling.
    pub tolerance: f32,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tessellator {
    /// Create a new tessellator with default settings.
    pub fn new() -> Self {
        Self {
            fill_tessellator: FillTessellator::new(),
            tolerance: 0.01,
        }
    }

    /// Tessellate a set of closed contours as one filled shape.
    ///
    /// Triangles come back wound counter-clockwise. An outline lyon rejects
    /// tessellates to an empty mesh with a warning.
    pub fn tessellate_contours(
        &mut self,
        contours: &[Contour],
        fill_rule: FillRule,
    ) -> TessellatedMesh<FillVertex> {
        let mut buffers: VertexBuffers<FillVertex, u32> = VertexBuffers::new();

        let options = FillOptions::default()
            .with_tolerance(self.tolerance)
            .with_fill_rule(convert_fill_rule(fill_rule));

        let events = contours_to_events(contours);

        let result = self.fill_tessellator.tessellate(
            events,
            &options,
            &mut BuffersBuilder::new(&mut buffers, |vertex: LyonFillVertex| {
                FillVertex::new(vertex.position().x, vertex.position().y)
            }),
        );

        if let Err(err) = result {
            tracing::warn!("Fill tessellation failed: {:?}", err);
            return TessellatedMesh::new();
        }

        let mut mesh = TessellatedMesh::from_data(buffers.vertices, buffers.indices);
        wind_counter_clockwise(&mut mesh);
        mesh
    }
}

/// Convert contours to Lyon path events, one closed sub-path per contour.
fn contours_to_events(contours: &[Contour]) -> Vec<PathEvent> {
    let mut events = Vec::new();

    for contour in contours.iter().filter(|c| !c.is_degenerate()) {
        let points = contour.points();
        let first = point(points[0].x, points[0].y);
        let mut current = first;
        events.push(PathEvent::Begin { at: first });

        for p in &points[1..] {
            let to = point(p.x, p.y);
            events.push(PathEvent::Line { from: current, to });
            current = to;
        }

        events.push(PathEvent::End {
            last: current,
            first,
            close: true,
        });
    }

    events
}

fn wind_counter_clockwise(mesh: &mut TessellatedMesh<FillVertex>) {
    let vertices = &mesh.vertices;
    for tri in mesh.indices.chunks_exact_mut(3) {
        let a = vertices[tri[0] as usize].to_vec2();
        let b = vertices[tri[1] as usize].to_vec2();
        let c = vertices[tri[2] as usize].to_vec2();
        if (b - a).perp_dot(c - a) < 0.0 {
            tri.swap(1, 2);
        }
    }
}

/// Convert our fill rule to Lyon's.
fn convert_fill_rule(rule: FillRule) -> lyon::lyon_tessellation::FillRule {
    match rule {
        FillRule::NonZero => lyon::lyon_tessellation::FillRule::NonZero,
        FillRule::EvenOdd => lyon::lyon_tessellation::FillRule::EvenOdd,
    }
}

//! Polygon meshes.
//!
//! A [`PolygonMesh`] is the raw 3D output of glyph rasterization: a shared
//! vertex pool and polygons given as vertex loops. Caps are triangles, side
//! walls are quads, so a mesh is not triangulated until
//! [`PolygonMesh::triangulate`] has run.

use crate::{FillVertex, TessellatedMesh};
use glam::Vec3;

/// A 3D mesh of arbitrary polygons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonMesh {
    positions: Vec<Vec3>,
    polygons: Vec<Vec<u32>>,
}

impl PolygonMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mesh from raw parts. Indices are not validated.
    pub fn from_parts(positions: Vec<Vec3>, polygons: Vec<Vec<u32>>) -> Self {
        Self {
            positions,
            polygons,
        }
    }

    /// Add a vertex and return its index.
    pub fn add_vertex(&mut self, position: Vec3) -> u32 {
        self.positions.push(position);
        (self.positions.len() - 1) as u32
    }

    /// Add a polygon as a loop of vertex indices.
    pub fn add_polygon(&mut self, indices: impl Into<Vec<u32>>) {
        self.polygons.push(indices.into());
    }

    /// Lift a 2D tessellation onto the plane `z`.
    ///
    /// With `flip` the triangle winding is reversed, for caps facing -z.
    pub fn add_tessellated(&mut self, mesh: &TessellatedMesh<FillVertex>, z: f32, flip: bool) {
        let base = self.positions.len() as u32;
        self.positions
            .extend(mesh.vertices.iter().map(|v| v.to_vec2().extend(z)));
        for [a, b, c] in mesh.triangles() {
            if flip {
                self.polygons.push(vec![base + a, base + c, base + b]);
            } else {
                self.polygons.push(vec![base + a, base + b, base + c]);
            }
        }
    }

    /// Append another mesh, re-basing its indices.
    pub fn append(&mut self, other: &PolygonMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.polygons.extend(
            other
                .polygons
                .iter()
                .map(|poly| poly.iter().map(|i| i + base).collect()),
        );
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn polygons(&self) -> &[Vec<u32>] {
        &self.polygons
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// A mesh without polygons has no visible geometry.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Positions of one polygon in loop order. Out-of-range indices are
    /// skipped.
    pub fn polygon_positions(&self, polygon: usize) -> impl Iterator<Item = Vec3> + '_ {
        self.polygons[polygon]
            .iter()
            .filter_map(|&i| self.positions.get(i as usize).copied())
    }

    /// Whether every polygon is a triangle.
    pub fn is_triangulated(&self) -> bool {
        self.polygons.iter().all(|poly| poly.len() == 3)
    }

    /// Split every polygon with more than three vertices into a triangle fan.
    ///
    /// Polygons with fewer than three vertices cannot be triangulated and are
    /// kept unchanged.
    pub fn triangulate(&self) -> PolygonMesh {
        let mut polygons = Vec::with_capacity(self.polygons.len());
        for poly in &self.polygons {
            if poly.len() <= 3 {
                polygons.push(poly.clone());
                continue;
            }
            for i in 1..poly.len() - 1 {
                polygons.push(vec![poly[0], poly[i], poly[i + 1]]);
            }
        }
        PolygonMesh {
            positions: self.positions.clone(),
            polygons,
        }
    }

    /// Axis-aligned bounds over the vertices referenced by polygons.
    ///
    /// Returns `None` when no polygon references a vertex.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;

        for poly in &self.polygons {
            for &i in poly {
                if let Some(p) = self.positions.get(i as usize) {
                    min = min.min(*p);
                    max = max.max(*p);
                    any = true;
                }
            }
        }

        any.then_some((min, max))
    }

    /// Width of the bounding box along x, zero for an empty mesh.
    pub fn width(&self) -> f32 {
        self.bounds().map_or(0.0, |(min, max)| max.x - min.x)
    }
}

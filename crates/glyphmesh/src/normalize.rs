//! Mesh normalization.
//!
//! Converts rasterizer output into atlas faces. Every polygon with more than
//! three vertices is fan-triangulated first; whatever is still not a triangle
//! afterwards is malformed and handled by [`MalformedPolygonPolicy`].

use crate::atlas::{Face, Vertex};
use glam::{Vec2, Vec3};
use glyphmesh_geometry::PolygonMesh;

/// What to do with faces that are not triangles after triangulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolygonPolicy {
    /// Log a warning and keep the face.
    #[default]
    Warn,
    /// Log a warning and drop the face.
    Discard,
}

/// Normalization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Attach the flat face normal to every vertex.
    pub normals: bool,
    /// Attach a planar UV, xy mapped onto the mesh bounds.
    pub uvs: bool,
    pub malformed: MalformedPolygonPolicy,
}

impl NormalizeOptions {
    pub fn with_normals(mut self, normals: bool) -> Self {
        self.normals = normals;
        self
    }

    pub fn with_uvs(mut self, uvs: bool) -> Self {
        self.uvs = uvs;
        self
    }

    pub fn with_malformed_policy(mut self, policy: MalformedPolygonPolicy) -> Self {
        self.malformed = policy;
        self
    }
}

/// Faces produced from one mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedMesh {
    pub faces: Vec<Face>,
    /// Faces that were not triangles, kept or discarded per policy.
    pub malformed: usize,
}

/// Convert a polygon mesh into atlas faces.
pub fn normalize(mesh: &PolygonMesh, options: &NormalizeOptions) -> Vec<Face> {
    normalize_mesh(mesh, options).faces
}

/// Like [`normalize`], also counting malformed faces.
pub fn normalize_mesh(mesh: &PolygonMesh, options: &NormalizeOptions) -> NormalizedMesh {
    let triangulated;
    let mesh = if mesh.is_triangulated() {
        mesh
    } else {
        triangulated = mesh.triangulate();
        &triangulated
    };

    let uv_frame = if options.uvs {
        mesh.bounds().map(|(min, max)| UvFrame::new(min, max))
    } else {
        None
    };

    let mut out = NormalizedMesh {
        faces: Vec::with_capacity(mesh.polygon_count()),
        malformed: 0,
    };

    for (index, polygon) in mesh.polygons().iter().enumerate() {
        let positions: Vec<Vec3> = mesh.polygon_positions(index).collect();

        if polygon.len() != 3 || positions.len() != 3 {
            out.malformed += 1;
            tracing::warn!(
                "Polygon {} has {} indices resolving to {} vertices after triangulation, expected 3",
                index,
                polygon.len(),
                positions.len()
            );
            if options.malformed == MalformedPolygonPolicy::Discard {
                continue;
            }
        }

        let normal = options.normals.then(|| face_normal(&positions));
        let vertices = positions
            .iter()
            .map(|&position| Vertex {
                position,
                normal,
                uv: uv_frame.as_ref().map(|frame| frame.map(position)),
            })
            .collect();
        out.faces.push(Face::new(vertices));
    }

    out
}

/// Unit normal of a face from its first three vertices; zero when degenerate.
pub fn face_normal(positions: &[Vec3]) -> Vec3 {
    match positions {
        [a, b, c, ..] => (*b - *a).cross(*c - *a).normalize_or_zero(),
        _ => Vec3::ZERO,
    }
}

struct UvFrame {
    min: Vec2,
    extent: Vec2,
}

impl UvFrame {
    fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.truncate(),
            extent: (max - min).truncate(),
        }
    }

    fn map(&self, position: Vec3) -> Vec2 {
        let local = position.truncate() - self.min;
        Vec2::new(
            if self.extent.x > 0.0 { local.x / self.extent.x } else { 0.0 },
            if self.extent.y > 0.0 { local.y / self.extent.y } else { 0.0 },
        )
    }
}

//! glyphmesh Geometry - outline geometry for glyph meshes
//!
//! This crate provides:
//! - Path and Bezier primitives for glyph outlines
//! - Flattening of paths into closed contours, and contour offsetting
//! - Tessellation of contours into triangles (via Lyon)
//! - Extrusion and bevelling of outlines into 3D polygon meshes
//!
//! # Example
//!
//! ```
//! use glyphmesh_geometry::*;
//! use glam::Vec2;
//!
//! let mut builder = PathBuilder::new();
//! builder.rect(Vec2::ZERO, Vec2::new(1.0, 1.0));
//! let contours = flatten_path(&builder.build(), 5);
//!
//! let mut tessellator = Tessellator::new();
//! let options = ExtrudeOptions { depth: 0.1, ..Default::default() };
//! let mesh = extrude_contours(&contours, &options, &mut tessellator).triangulate();
//!
//! assert!(mesh.is_triangulated());
//! ```

// Core primitives
mod curve;
mod path;
mod transform;

// Outline processing
pub mod contour;
mod extrude;
mod mesh;
mod tessellator;
mod vertex;

// Re-exports
pub use curve::*;
pub use path::*;
pub use transform::*;

pub use contour::{Contour, Orientation, flatten_path, offset_contours};
pub use extrude::*;
pub use mesh::*;
pub use tessellator::*;
pub use vertex::*;

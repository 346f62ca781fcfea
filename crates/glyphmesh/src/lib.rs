//! glyphmesh - glyph mesh atlases for real-time text
//!
//! glyphmesh rasterizes every character of a set into a triangulated 3D mesh
//! and records how far each glyph advances the pen. The result is a
//! [`FontAtlas`], written as a `registerFont('<name>',{...});` script that a
//! WebGL-style renderer loads directly.
//!
//! - **Rasterization**: the [`GlyphRasterizer`] trait, with the font-backed
//!   [`OutlineRasterizer`] (feature `outline`, on by default)
//! - **Width measurement**: advances found by padded differencing
//! - **Normalization**: every face a triangle, optional normals and UVs
//! - **Serialization**: the `registerFont` wire format, both directions
//! - **Consumption**: [`GlyphBuffer`] for GPU upload, [`TextLayout`] for
//!   multi-line placement
//!
//! # Quick Start
//!
//! ```no_run
//! use glyphmesh::{FontAtlasBuilder, OutlineRasterizer, StyleOptions, write_atlas};
//!
//! let style = StyleOptions::default().with_extrude(0.1).with_bevel(0.02, 2);
//! let builder = FontAtlasBuilder::new(OutlineRasterizer::new());
//!
//! let atlas = builder.build("Hello, world!", &style)?;
//! write_atlas("hello.js", &atlas, "Hello")?;
//! # Ok::<(), glyphmesh::AtlasError>(())
//! ```

pub mod atlas;
pub mod buffer;
pub mod builder;
pub mod charset;
pub mod error;
pub mod layout;
pub mod measure;
pub mod normalize;
pub mod rasterizer;
pub mod serialize;
pub mod style;

pub use glyphmesh_core as core;
pub use glyphmesh_geometry as geometry;
#[cfg(feature = "outline")]
pub use glyphmesh_text as text;

pub use atlas::{BuildReport, Face, FontAtlas, GlyphIssue, GlyphRecord, Vertex};
pub use buffer::{GlyphBuffer, GlyphRange, GlyphVertex};
pub use builder::FontAtlasBuilder;
pub use charset::CharacterSet;
pub use error::{AtlasError, AtlasResult};
pub use layout::{GlyphPosition, LayoutOptions, LineMetrics, TextLayout};
pub use measure::measure_width;
pub use normalize::{MalformedPolygonPolicy, NormalizeOptions, NormalizedMesh, normalize};
pub use rasterizer::{GlyphRasterizer, RasterResult, RasterizationSession};
#[cfg(feature = "outline")]
pub use rasterizer::{OutlineRasterizer, OutlineSession};
pub use serialize::{parse, read_atlas, serialize, validate_font_name, write_atlas};
pub use style::StyleOptions;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AtlasError, AtlasResult, CharacterSet, FontAtlas, FontAtlasBuilder, GlyphRasterizer,
        GlyphRecord, NormalizeOptions, RasterResult, RasterizationSession, StyleOptions,
    };

    #[cfg(feature = "outline")]
    pub use crate::OutlineRasterizer;
}

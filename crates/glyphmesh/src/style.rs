//! Glyph style options.

use crate::error::{AtlasError, AtlasResult};
use glyphmesh_geometry::ExtrudeOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How glyphs are rasterized.
///
/// Constructed once per build and shared read-only by every step. Config
/// files use camelCase keys; missing keys take their defaults and unknown
/// keys are rejected.
///
/// ```
/// use glyphmesh::StyleOptions;
///
/// let style = StyleOptions::from_json_str(r#"{ "resolution": 10, "bevelDepth": 0.02 }"#).unwrap();
/// assert_eq!(style.resolution, 10);
/// assert_eq!(style.width_padding_glyphs, "gs");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct StyleOptions {
    /// Line segments per curve segment. Zero behaves like one.
    pub resolution: u32,
    /// Outline growth (positive) or thinning (negative), in em.
    pub offset: f32,
    /// Half-depth of the extrusion, in em. Zero is flat.
    pub extrude: f32,
    /// Size of the rounded edge, in em.
    pub bevel_depth: f32,
    /// Extra segments on the rounded edge.
    pub bevel_resolution: u32,
    /// Glyph scale in em.
    pub size: f32,
    /// Horizontal slant factor.
    pub shear: f32,
    /// Font file; `None` selects the rasterizer's default font.
    pub font: Option<PathBuf>,
    /// Glyphs placed on both sides of a character when measuring its width.
    pub width_padding_glyphs: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            resolution: 5,
            offset: 0.0,
            extrude: 0.0,
            bevel_depth: 0.0,
            bevel_resolution: 0,
            size: 1.0,
            shear: 0.0,
            font: None,
            width_padding_glyphs: "gs".to_string(),
        }
    }
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a style from JSON.
    pub fn from_json_str(json: &str) -> AtlasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a style config file.
    pub fn from_file(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AtlasError::InputReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|err| AtlasError::InvalidConfig {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    pub fn with_font(mut self, font: impl Into<PathBuf>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_extrude(mut self, extrude: f32) -> Self {
        self.extrude = extrude;
        self
    }

    pub fn with_bevel(mut self, depth: f32, resolution: u32) -> Self {
        self.bevel_depth = depth;
        self.bevel_resolution = resolution;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_padding(mut self, padding: impl Into<String>) -> Self {
        self.width_padding_glyphs = padding.into();
        self
    }

    /// Segments per curve actually used by rasterization.
    pub fn effective_resolution(&self) -> u32 {
        self.resolution.max(1)
    }

    /// The extrusion parameters of this style.
    pub fn extrude_options(&self) -> ExtrudeOptions {
        ExtrudeOptions {
            depth: self.extrude,
            bevel_depth: self.bevel_depth,
            bevel_resolution: self.bevel_resolution,
        }
    }
}

//! GPU-ready vertex data for an atlas.
//!
//! All glyphs are packed into one interleaved vertex array so a renderer can
//! upload it once and draw any glyph as a range of triangles.

use crate::atlas::FontAtlas;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use glyphmesh_core::math::PackedVec3;
use indexmap::IndexMap;

/// Interleaved position and normal, 24 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GlyphVertex {
    pub position: PackedVec3,
    pub normal: PackedVec3,
}

impl GlyphVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }
}

/// Where a glyph's vertices live in the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRange {
    pub kerning_width: f32,
    /// First vertex.
    pub start: u32,
    pub vertex_count: u32,
}

impl GlyphRange {
    pub fn end(&self) -> u32 {
        self.start + self.vertex_count
    }
}

/// Every glyph of an atlas as one triangle list.
#[derive(Debug, Clone, Default)]
pub struct GlyphBuffer {
    vertices: Vec<GlyphVertex>,
    ranges: IndexMap<char, GlyphRange>,
}

impl GlyphBuffer {
    /// Pack an atlas. Each triangle gets its flat normal on all three
    /// vertices; faces that are not triangles are skipped.
    pub fn from_atlas(atlas: &FontAtlas) -> Self {
        let mut buffer = Self {
            vertices: Vec::with_capacity(atlas.face_count() * 3),
            ranges: IndexMap::with_capacity(atlas.len()),
        };

        for (character, record) in atlas.iter() {
            let start = buffer.vertices.len() as u32;
            let mut skipped = 0usize;

            for face in &record.mesh {
                let [a, b, c] = match face.vertices() {
                    [a, b, c] => [a.position, b.position, c.position],
                    _ => {
                        skipped += 1;
                        continue;
                    }
                };
                let normal = (b - a).cross(c - a).normalize_or_zero();
                buffer.vertices.extend([
                    GlyphVertex::new(a, normal),
                    GlyphVertex::new(b, normal),
                    GlyphVertex::new(c, normal),
                ]);
            }

            if skipped > 0 {
                tracing::warn!("Skipped {} non-triangular faces of {:?}", skipped, character);
            }

            buffer.ranges.insert(
                character,
                GlyphRange {
                    kerning_width: record.kerning_width,
                    start,
                    vertex_count: buffer.vertices.len() as u32 - start,
                },
            );
        }

        buffer
    }

    pub fn vertices(&self) -> &[GlyphVertex] {
        &self.vertices
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn range(&self, character: char) -> Option<&GlyphRange> {
        self.ranges.get(&character)
    }

    /// Whether a glyph draws nothing. `None` for unknown characters.
    pub fn is_whitespace(&self, character: char) -> Option<bool> {
        self.range(character).map(|range| range.vertex_count == 0)
    }

    pub fn letter_kerning(&self, character: char) -> Option<f32> {
        self.range(character).map(|range| range.kerning_width)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn glyph_count(&self) -> usize {
        self.ranges.len()
    }
}

//! Multi-line text layout over an atlas.
//!
//! Glyph origins are computed from the atlas' kerning widths alone. Lines are
//! split on `\n` and stacked downward by the line spacing; a line can be
//! centered within the widest line, and justified lines spread the missing
//! width evenly over their whitespace glyphs.

use crate::atlas::FontAtlas;
use crate::error::{AtlasError, AtlasResult};
use glam::Vec2;

/// Layout parameters, in em.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Vertical distance between baselines.
    pub line_spacing: f32,
    /// Extra advance after every glyph.
    pub letter_spacing: f32,
    /// Multiplier on every kerning width.
    pub kerning: f32,
    pub centered: bool,
    pub justified: bool,
    /// Shift everything left by half the width so x = 0 is the middle.
    pub center_to_origin: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            line_spacing: 0.8,
            letter_spacing: 0.0,
            kerning: 1.0,
            centered: false,
            justified: false,
            center_to_origin: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct LaidGlyph {
    character: char,
    advance: f32,
    whitespace: bool,
}

/// Metrics of one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMetrics {
    glyphs: Vec<LaidGlyph>,
    pub width: f32,
    pub whitespace_count: usize,
}

impl LineMetrics {
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// A positioned glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPosition {
    pub character: char,
    /// Origin of the glyph.
    pub origin: Vec2,
    pub line: usize,
}

/// A body of text measured against an atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    lines: Vec<LineMetrics>,
    width: f32,
    height: f32,
    options: LayoutOptions,
}

impl TextLayout {
    /// Measure `body`. Every character must be in the atlas.
    pub fn new(atlas: &FontAtlas, body: &str, options: LayoutOptions) -> AtlasResult<Self> {
        let mut lines = Vec::new();
        let mut width = 0.0_f32;
        let mut height = 0.0_f32;

        for text in body.split('\n') {
            let mut line = LineMetrics {
                glyphs: Vec::with_capacity(text.len()),
                width: 0.0,
                whitespace_count: 0,
            };

            for character in text.chars() {
                let record = atlas
                    .get(character)
                    .ok_or(AtlasError::MissingGlyph { character })?;
                let advance = record.kerning_width * options.kerning + options.letter_spacing;
                let whitespace = record.is_whitespace();

                line.width += advance;
                if whitespace {
                    line.whitespace_count += 1;
                }
                line.glyphs.push(LaidGlyph {
                    character,
                    advance,
                    whitespace,
                });
            }

            width = width.max(line.width);
            height += options.line_spacing;
            lines.push(line);
        }

        Ok(Self {
            lines,
            width,
            height,
            options,
        })
    }

    /// Width of the widest line.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Line spacing times the number of lines.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Origins of every glyph, line by line.
    pub fn positions(&self) -> Vec<GlyphPosition> {
        let options = &self.options;
        let mut positions = Vec::new();
        let origin_x = if options.center_to_origin {
            -self.width / 2.0
        } else {
            0.0
        };

        for (index, line) in self.lines.iter().enumerate() {
            let slack = self.width - line.width;
            let mut x = origin_x;
            if options.centered {
                x += slack / 2.0;
            }
            let y = -(index as f32) * options.line_spacing;

            for glyph in &line.glyphs {
                positions.push(GlyphPosition {
                    character: glyph.character,
                    origin: Vec2::new(x, y),
                    line: index,
                });
                // Only reached when the line has whitespace, so never a zero
                // divisor.
                if options.justified && glyph.whitespace {
                    x += slack / line.whitespace_count as f32;
                }
                x += glyph.advance;
            }
        }

        positions
    }
}

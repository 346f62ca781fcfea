//! Text shaping over glyph outlines.
//!
//! Lays a string out on a single baseline: each character maps to one glyph,
//! the pen advances by the glyph's horizontal advance plus any `kern` table
//! pair adjustment, and the glyph outlines are collected into one path. All
//! coordinates are in font units.

use crate::{
    cache::OutlineCache,
    error::TextResult,
    font::LoadedFont,
};
use glam::Vec2;
use glyphmesh_core::profiling::profile_function;
use glyphmesh_geometry::{Path, PathBuilder, Transform2D};
use ttf_parser::{Face, GlyphId};

/// A positioned glyph after shaping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedGlyph {
    /// Source character
    pub ch: char,
    /// Glyph index in the font (0 is `.notdef`)
    pub glyph_id: u16,
    /// Pen position of the glyph origin
    pub x: f32,
    /// Horizontal advance of this glyph
    pub advance: f32,
    /// Pair kerning applied between the previous glyph and this one
    pub kerning: f32,
    /// Whether the glyph contributed an outline
    pub has_outline: bool,
}

/// Result of shaping a string.
#[derive(Debug, Clone, Default)]
pub struct ShapedText {
    /// Positioned glyphs, one per character
    pub glyphs: Vec<ShapedGlyph>,
    /// All glyph outlines, translated to their pen positions
    pub outline: Path,
    /// Final pen position
    pub advance: f32,
}

impl ShapedText {
    /// Whether any glyph produced an outline.
    pub fn has_outline(&self) -> bool {
        !self.outline.is_empty()
    }
}

/// Collects ttf-parser outline callbacks into a [`PathBuilder`].
struct OutlineSink {
    builder: PathBuilder,
}

impl ttf_parser::OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(Vec2::new(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(Vec2::new(x, y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(Vec2::new(x1, y1), Vec2::new(x, y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder
            .cubic_to(Vec2::new(x1, y1), Vec2::new(x2, y2), Vec2::new(x, y));
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Extract the outline of one glyph in font units.
pub fn glyph_outline(face: &Face<'_>, glyph_id: u16) -> Option<Path> {
    let mut sink = OutlineSink {
        builder: PathBuilder::new(),
    };
    face.outline_glyph(GlyphId(glyph_id), &mut sink)?;
    if sink.builder.is_empty() {
        return None;
    }
    Some(sink.builder.build())
}

/// Horizontal `kern` adjustment between two glyphs, in font units.
pub fn pair_kerning(face: &Face<'_>, left: u16, right: u16) -> i16 {
    let Some(kern) = face.tables().kern else {
        return 0;
    };
    kern.subtables
        .into_iter()
        .filter(|subtable| subtable.horizontal && !subtable.variable)
        .find_map(|subtable| subtable.glyphs_kerning(GlyphId(left), GlyphId(right)))
        .unwrap_or(0)
}

/// Shape `text` with `font`.
///
/// Control characters advance the pen like any other glyph but never
/// contribute an outline. Characters missing from the font advance the pen
/// by the `.notdef` advance and contribute no outline either.
pub fn shape_text(
    font: &LoadedFont,
    cache: &mut OutlineCache,
    text: &str,
) -> TextResult<ShapedText> {
    profile_function!();

    let face = font.face()?;
    let mut shaped = ShapedText::default();
    let mut pen = 0.0_f32;
    let mut previous: Option<u16> = None;

    for ch in text.chars() {
        let mapped = face.glyph_index(ch);
        let glyph_id = mapped.map_or(0, |id| id.0);

        let kerning = previous.map_or(0.0, |prev| pair_kerning(&face, prev, glyph_id) as f32);
        pen += kerning;

        let advance = face
            .glyph_hor_advance(GlyphId(glyph_id))
            .map_or(0.0, f32::from);

        let outline = if ch.is_control() || mapped.is_none() {
            None
        } else {
            cache.get_or_extract(glyph_id, || glyph_outline(&face, glyph_id))
        };

        if let Some(outline) = &outline {
            shaped
                .outline
                .append_transformed(outline, &Transform2D::translate(Vec2::new(pen, 0.0)));
        }

        shaped.glyphs.push(ShapedGlyph {
            ch,
            glyph_id,
            x: pen,
            advance,
            kerning,
            has_outline: outline.is_some(),
        });

        pen += advance;
        previous = Some(glyph_id);
    }

    shaped.advance = pen;
    Ok(shaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FontDatabase;

    /// System fonts are not guaranteed on build machines.
    fn system_font() -> Option<LoadedFont> {
        let font = FontDatabase::new().first_font_covering("gs").ok();
        if font.is_none() {
            eprintln!("no system fonts available, skipping");
        }
        font
    }

    #[test]
    fn test_empty_text() {
        let Some(font) = system_font() else { return };
        let mut cache = OutlineCache::new();
        let shaped = shape_text(&font, &mut cache, "").unwrap();

        assert!(shaped.glyphs.is_empty());
        assert!(!shaped.has_outline());
        assert_eq!(shaped.advance, 0.0);
    }

    #[test]
    fn test_space_has_no_outline() {
        let Some(font) = system_font() else { return };
        let mut cache = OutlineCache::new();
        let shaped = shape_text(&font, &mut cache, " \t").unwrap();

        assert!(!shaped.has_outline());
        assert!(shaped.glyphs.iter().all(|g| !g.has_outline));
    }

    #[test]
    fn test_missing_glyph_has_no_outline() {
        let Some(font) = system_font() else { return };
        let missing = '\u{E123}';
        if font.covers(&missing.to_string()) {
            eprintln!("font maps {missing:?}, skipping");
            return;
        }

        let mut cache = OutlineCache::new();
        let alone = shape_text(&font, &mut cache, &missing.to_string()).unwrap();
        assert!(!alone.has_outline());
        assert!(!alone.glyphs[0].has_outline);
        assert_eq!(alone.glyphs[0].glyph_id, 0);

        let padded = shape_text(&font, &mut cache, &format!("g{missing}s")).unwrap();
        assert!(padded.has_outline());
        assert!(padded.glyphs[2].x >= padded.glyphs[1].x);
    }

    #[test]
    fn test_pen_advances_monotonically() {
        let Some(font) = system_font() else { return };
        let mut cache = OutlineCache::new();
        let shaped = shape_text(&font, &mut cache, "gsgs").unwrap();

        assert_eq!(shaped.glyphs.len(), 4);
        assert!(shaped.advance > 0.0);
        // The same two glyphs repeat, so the cache must hit.
        assert!(cache.hits >= 2);
    }
}

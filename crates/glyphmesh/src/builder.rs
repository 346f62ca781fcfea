//! Atlas construction.

use crate::atlas::{BuildReport, FontAtlas, GlyphIssue, GlyphRecord};
use crate::error::AtlasResult;
use crate::measure::measure_width;
use crate::normalize::{NormalizeOptions, normalize_mesh};
use crate::rasterizer::{GlyphRasterizer, RasterizationSession};
use crate::style::StyleOptions;
use glyphmesh_core::profiling::{profile_function, profile_scope};

/// Builds a [`FontAtlas`] from a character set.
///
/// One rasterization session is opened per build. Characters are processed
/// strictly in order: measure the width, rasterize the character alone,
/// normalize the mesh, insert the record. The session is closed when the
/// build returns, successfully or not.
///
/// # Example
///
/// ```no_run
/// use glyphmesh::{FontAtlasBuilder, OutlineRasterizer, StyleOptions};
///
/// let builder = FontAtlasBuilder::new(OutlineRasterizer::new());
/// let atlas = builder.build("AB ", &StyleOptions::default()).unwrap();
/// assert_eq!(atlas.len(), 3);
/// ```
pub struct FontAtlasBuilder<R> {
    rasterizer: R,
    normalize: NormalizeOptions,
}

impl<R: GlyphRasterizer> FontAtlasBuilder<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            normalize: NormalizeOptions::default(),
        }
    }

    pub fn with_normalize_options(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    pub fn normalize_options(&self) -> &NormalizeOptions {
        &self.normalize
    }

    /// Build an atlas. Later duplicates of a character replace earlier ones.
    pub fn build(&self, characters: impl AsRef<str>, style: &StyleOptions) -> AtlasResult<FontAtlas> {
        self.build_with_report(characters, style)
            .map(|(atlas, _)| atlas)
    }

    /// Build an atlas and report the glyph issues absorbed on the way.
    pub fn build_with_report(
        &self,
        characters: impl AsRef<str>,
        style: &StyleOptions,
    ) -> AtlasResult<(FontAtlas, BuildReport)> {
        profile_function!();

        let characters = characters.as_ref();
        let mut session = self.rasterizer.open_session(style)?;

        let mut atlas = FontAtlas::new();
        let mut report = BuildReport::new();

        for character in characters.chars() {
            let record = self.build_glyph(&mut session, character, style, &mut report)?;
            if atlas.insert(character, record).is_some() {
                tracing::debug!("Replaced earlier entry for {:?}", character);
            }
        }

        drop(session);

        tracing::info!(
            "Built atlas: {} glyphs, {} faces, {} unprintable, {} malformed faces",
            atlas.len(),
            atlas.face_count(),
            report.unprintable().count(),
            report.malformed_faces()
        );

        Ok((atlas, report))
    }

    fn build_glyph(
        &self,
        session: &mut R::Session,
        character: char,
        style: &StyleOptions,
        report: &mut BuildReport,
    ) -> AtlasResult<GlyphRecord> {
        profile_scope!("build_glyph");

        let kerning_width = match measure_width(session, character, style)? {
            Some(width) => width,
            None => {
                report.push(character, GlyphIssue::Unmeasured);
                0.0
            }
        };

        let Some(mesh) = session.rasterize(&character.to_string()).into_geometry() else {
            tracing::debug!("{:?} is unprintable, width {}", character, kerning_width);
            report.push(character, GlyphIssue::Unprintable);
            return Ok(GlyphRecord::empty(kerning_width));
        };

        let normalized = normalize_mesh(&mesh, &self.normalize);
        if normalized.malformed > 0 {
            report.push(
                character,
                GlyphIssue::MalformedPolygon {
                    faces: normalized.malformed,
                },
            );
        }

        tracing::debug!(
            "{:?}: width {}, {} faces",
            character,
            kerning_width,
            normalized.faces.len()
        );

        Ok(GlyphRecord::new(kerning_width, normalized.faces))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AtlasError;
    use crate::rasterizer::RasterResult;
    use glam::Vec3;
    use glyphmesh_geometry::PolygonMesh;

    /// Every non-space character is a unit quad at its index.
    struct QuadRasterizer;

    struct QuadSession;

    impl GlyphRasterizer for QuadRasterizer {
        type Session = QuadSession;

        fn open_session(&self, style: &StyleOptions) -> AtlasResult<QuadSession> {
            match &style.font {
                Some(path) => Err(AtlasError::FontResourceUnavailable {
                    path: Some(path.clone()),
                    reason: "not loadable".into(),
                }),
                None => Ok(QuadSession),
            }
        }
    }

    impl RasterizationSession for QuadSession {
        fn rasterize(&mut self, body: &str) -> RasterResult {
            let mut mesh = PolygonMesh::new();
            for (i, ch) in body.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x = i as f32;
                let a = mesh.add_vertex(Vec3::new(x, 0.0, 0.0));
                let b = mesh.add_vertex(Vec3::new(x + 1.0, 0.0, 0.0));
                let c = mesh.add_vertex(Vec3::new(x + 1.0, 1.0, 0.0));
                let d = mesh.add_vertex(Vec3::new(x, 1.0, 0.0));
                mesh.add_polygon([a, b, c, d]);
            }
            RasterResult::from_mesh(mesh)
        }
    }

    #[test]
    fn test_build_triangulates_quads() {
        let builder = FontAtlasBuilder::new(QuadRasterizer);
        let (atlas, report) = builder
            .build_with_report("a b", &StyleOptions::default())
            .unwrap();

        assert_eq!(atlas.len(), 3);
        assert_eq!(atlas.get('a').unwrap().mesh.len(), 2);
        assert!(atlas.get(' ').unwrap().is_whitespace());
        assert_eq!(report.unprintable().collect::<Vec<_>>(), vec![' ']);
        assert_eq!(report.malformed_faces(), 0);
    }

    #[test]
    fn test_font_failure_aborts() {
        let builder = FontAtlasBuilder::new(QuadRasterizer);
        let style = StyleOptions::default().with_font("missing.ttf");
        assert!(matches!(
            builder.build("abc", &style),
            Err(AtlasError::FontResourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_empty_character_set() {
        let builder = FontAtlasBuilder::new(QuadRasterizer);
        let atlas = builder.build("", &StyleOptions::default()).unwrap();
        assert!(atlas.is_empty());
    }
}

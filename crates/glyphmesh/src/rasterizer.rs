//! Glyph rasterization.
//!
//! A [`GlyphRasterizer`] turns text bodies into 3D polygon meshes. It opens a
//! [`RasterizationSession`] per build; the session owns whatever state
//! rasterization needs (the loaded font, caches) and is dropped when the build
//! ends.
//!
//! [`OutlineRasterizer`] is the font-backed implementation: glyph outlines
//! from `ttf-parser`, flattened, offset, tessellated and extruded.

use crate::error::AtlasResult;
use crate::style::StyleOptions;
use glyphmesh_geometry::PolygonMesh;

/// The outcome of rasterizing one text body.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterResult {
    /// The body produced geometry.
    Geometry(PolygonMesh),
    /// The body produced nothing drawable.
    Unprintable,
}

impl RasterResult {
    /// Wrap a mesh; a mesh without polygons is unprintable.
    pub fn from_mesh(mesh: PolygonMesh) -> Self {
        if mesh.is_empty() {
            RasterResult::Unprintable
        } else {
            RasterResult::Geometry(mesh)
        }
    }

    /// The mesh, if it has any polygons.
    pub fn geometry(&self) -> Option<&PolygonMesh> {
        match self {
            RasterResult::Geometry(mesh) if !mesh.is_empty() => Some(mesh),
            _ => None,
        }
    }

    pub fn into_geometry(self) -> Option<PolygonMesh> {
        match self {
            RasterResult::Geometry(mesh) if !mesh.is_empty() => Some(mesh),
            _ => None,
        }
    }

    pub fn is_unprintable(&self) -> bool {
        self.geometry().is_none()
    }

    /// Bounding-box width along x, `None` when unprintable.
    pub fn width(&self) -> Option<f32> {
        self.geometry().map(PolygonMesh::width)
    }
}

/// Stateful context converting text bodies into geometry.
pub trait RasterizationSession {
    /// Rasterize a text body. Never fails: anything that cannot be drawn is
    /// [`RasterResult::Unprintable`].
    fn rasterize(&mut self, body: &str) -> RasterResult;
}

/// Opens rasterization sessions for a style.
pub trait GlyphRasterizer {
    type Session: RasterizationSession;

    /// Resolve the style's font and prepare a session.
    ///
    /// Fails with [`AtlasError::FontResourceUnavailable`](crate::AtlasError::FontResourceUnavailable)
    /// when the font cannot be loaded.
    fn open_session(&self, style: &StyleOptions) -> AtlasResult<Self::Session>;
}

impl<R: GlyphRasterizer + ?Sized> GlyphRasterizer for &R {
    type Session = R::Session;

    fn open_session(&self, style: &StyleOptions) -> AtlasResult<Self::Session> {
        (**self).open_session(style)
    }
}

impl<S: RasterizationSession + ?Sized> RasterizationSession for &mut S {
    fn rasterize(&mut self, body: &str) -> RasterResult {
        (**self).rasterize(body)
    }
}

#[cfg(feature = "outline")]
pub use outline::{OutlineRasterizer, OutlineSession};

#[cfg(feature = "outline")]
mod outline {
    use super::*;
    use crate::error::AtlasError;
    use glyphmesh_core::profiling::profile_function;
    use glyphmesh_geometry::{
        ExtrudeOptions, Tessellator, Transform2D, extrude_contours, flatten_path, offset_contours,
    };
    use glyphmesh_text::{FontDatabase, LoadedFont, OutlineCache, shape_text};
    use std::path::Path;

    /// Rasterizer backed by font outlines.
    ///
    /// Styles naming a font file load that file; otherwise the first face of
    /// the font database that has the width padding glyphs is used.
    pub struct OutlineRasterizer {
        db: FontDatabase,
    }

    impl OutlineRasterizer {
        /// A rasterizer over the system fonts.
        pub fn new() -> Self {
            Self {
                db: FontDatabase::new(),
            }
        }

        pub fn with_database(db: FontDatabase) -> Self {
            Self { db }
        }

        /// Make the fonts in a directory available as defaults.
        pub fn load_fonts_dir(&mut self, path: impl AsRef<Path>) {
            self.db.load_fonts_dir(path);
        }

        pub fn database(&self) -> &FontDatabase {
            &self.db
        }

        fn load_font(&self, style: &StyleOptions) -> AtlasResult<LoadedFont> {
            match &style.font {
                Some(path) => {
                    LoadedFont::from_file(path).map_err(|err| AtlasError::FontResourceUnavailable {
                        path: Some(path.clone()),
                        reason: err.to_string(),
                    })
                }
                None => self
                    .db
                    .first_font_covering(&style.width_padding_glyphs)
                    .map_err(|err| AtlasError::FontResourceUnavailable {
                        path: None,
                        reason: err.to_string(),
                    }),
            }
        }
    }

    impl Default for OutlineRasterizer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl GlyphRasterizer for OutlineRasterizer {
        type Session = OutlineSession;

        fn open_session(&self, style: &StyleOptions) -> AtlasResult<OutlineSession> {
            let font = self.load_font(style)?;
            tracing::debug!(
                "Opened session with font '{}' ({} units/em)",
                font.name(),
                font.units_per_em()
            );

            let to_em = style.size / f32::from(font.units_per_em());
            Ok(OutlineSession {
                font,
                cache: OutlineCache::new(),
                tessellator: Tessellator::new(),
                transform: Transform2D::scale(to_em).then_shear(style.shear),
                resolution: style.effective_resolution(),
                offset: style.offset,
                extrude: style.extrude_options(),
            })
        }
    }

    /// A session holding one loaded font.
    pub struct OutlineSession {
        font: LoadedFont,
        cache: OutlineCache,
        tessellator: Tessellator,
        transform: Transform2D,
        resolution: u32,
        offset: f32,
        extrude: ExtrudeOptions,
    }

    impl RasterizationSession for OutlineSession {
        fn rasterize(&mut self, body: &str) -> RasterResult {
            profile_function!();

            let shaped = match shape_text(&self.font, &mut self.cache, body) {
                Ok(shaped) => shaped,
                Err(err) => {
                    tracing::warn!("Failed to shape {:?}: {}", body, err);
                    return RasterResult::Unprintable;
                }
            };
            if !shaped.has_outline() {
                return RasterResult::Unprintable;
            }

            let outline = shaped.outline.transformed(&self.transform);
            let mut contours = flatten_path(&outline, self.resolution);
            if self.offset != 0.0 {
                contours = offset_contours(&contours, self.offset);
            }

            RasterResult::from_mesh(extrude_contours(
                &contours,
                &self.extrude,
                &mut self.tessellator,
            ))
        }
    }

    impl Drop for OutlineSession {
        fn drop(&mut self) {
            tracing::trace!(
                "Closing session for '{}' ({} outlines cached, {:.0}% hits)",
                self.font.name(),
                self.cache.len(),
                self.cache.hit_rate() * 100.0
            );
        }
    }
}

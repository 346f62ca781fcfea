//! Kerning width measurement.
//!
//! A glyph's own bounding box says nothing about its advance: spaces have no
//! box at all and side bearings are invisible. Instead the character is
//! rasterized between two copies of the padding glyphs and the width of the
//! padding alone is subtracted:
//!
//! ```text
//! width(pad + pad)       = W_pad
//! width(pad + c + pad)   = W_total
//! kerning width of c     = W_total - W_pad
//! ```

use crate::error::{AtlasError, AtlasResult};
use crate::rasterizer::RasterizationSession;
use crate::style::StyleOptions;

/// Measure the horizontal advance of `character` in `session`.
///
/// The result is not clamped; tight kerning can make it slightly negative.
/// Padding that draws nothing on its own is fatal. When only the padded
/// character fails to draw, the glyph cannot be measured and `Ok(None)` is
/// returned.
pub fn measure_width<S>(
    session: &mut S,
    character: char,
    style: &StyleOptions,
) -> AtlasResult<Option<f32>>
where
    S: RasterizationSession + ?Sized,
{
    let padding = style.width_padding_glyphs.as_str();
    let degenerate = || AtlasError::DegeneratePadding {
        padding: padding.to_string(),
    };

    if padding.is_empty() {
        return Err(degenerate());
    }

    let padded = format!("{padding}{padding}");
    let pad_width = session.rasterize(&padded).width().ok_or_else(degenerate)?;

    let body = format!("{padding}{character}{padding}");
    let Some(total_width) = session.rasterize(&body).width() else {
        tracing::warn!("{:?} between {:?} produces no geometry", character, padding);
        return Ok(None);
    };

    Ok(Some(total_width - pad_width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::RasterResult;
    use glam::Vec3;
    use glyphmesh_geometry::PolygonMesh;

    /// Lays characters out as unit-advance boxes; spaces have no box.
    struct Boxes;

    impl RasterizationSession for Boxes {
        fn rasterize(&mut self, body: &str) -> RasterResult {
            let mut mesh = PolygonMesh::new();
            for (i, ch) in body.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                let x = i as f32 + 0.1;
                let a = mesh.add_vertex(Vec3::new(x, 0.0, 0.0));
                let b = mesh.add_vertex(Vec3::new(x + 0.8, 0.0, 0.0));
                let c = mesh.add_vertex(Vec3::new(x + 0.8, 1.0, 0.0));
                mesh.add_polygon([a, b, c]);
            }
            RasterResult::from_mesh(mesh)
        }
    }

    #[test]
    fn test_width_is_advance() {
        let style = StyleOptions::default();
        let width = measure_width(&mut Boxes, 'x', &style).unwrap().unwrap();
        assert!((width - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_space_width() {
        let style = StyleOptions::default();
        let width = measure_width(&mut Boxes, ' ', &style).unwrap().unwrap();
        assert!((width - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_idempotent() {
        let style = StyleOptions::default();
        let mut session = Boxes;
        let first = measure_width(&mut session, 'q', &style).unwrap();
        let second = measure_width(&mut session, 'q', &style).unwrap();
        assert_eq!(first, second);
    }

    /// Boxes, except that any body containing `X` draws nothing.
    struct BrokenX;

    impl RasterizationSession for BrokenX {
        fn rasterize(&mut self, body: &str) -> RasterResult {
            if body.contains('X') {
                RasterResult::Unprintable
            } else {
                Boxes.rasterize(body)
            }
        }
    }

    #[test]
    fn test_unmeasurable_character_is_not_fatal() {
        let style = StyleOptions::default();
        assert_eq!(measure_width(&mut BrokenX, 'X', &style).unwrap(), None);
        assert!(measure_width(&mut BrokenX, 'a', &style).unwrap().is_some());
    }

    #[test]
    fn test_negative_width_is_kept() {
        /// `<` pulls the following glyph back by 0.3.
        struct Backstep;

        impl RasterizationSession for Backstep {
            fn rasterize(&mut self, body: &str) -> RasterResult {
                let mut mesh = PolygonMesh::new();
                let mut pen = 0.0_f32;
                for ch in body.chars() {
                    if ch == '<' {
                        pen -= 0.3;
                        continue;
                    }
                    let a = mesh.add_vertex(Vec3::new(pen + 0.1, 0.0, 0.0));
                    let b = mesh.add_vertex(Vec3::new(pen + 0.9, 0.0, 0.0));
                    let c = mesh.add_vertex(Vec3::new(pen + 0.9, 1.0, 0.0));
                    mesh.add_polygon([a, b, c]);
                    pen += 1.0;
                }
                RasterResult::from_mesh(mesh)
            }
        }

        let width = measure_width(&mut Backstep, '<', &StyleOptions::default())
            .unwrap()
            .unwrap();
        assert!((width + 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_padding() {
        for padding in ["", "  "] {
            let style = StyleOptions::default().with_padding(padding);
            let err = measure_width(&mut Boxes, 'x', &style).unwrap_err();
            assert!(matches!(err, AtlasError::DegeneratePadding { .. }));
        }
    }
}

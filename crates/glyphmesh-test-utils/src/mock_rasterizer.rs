//! Mock implementation of GlyphRasterizer for testing.
//!
//! Every printable character is drawn as a box inside a fixed-advance cell,
//! so widths and bounds are known exactly without loading a font.

use glam::Vec3;
use glyphmesh::{AtlasError, AtlasResult, GlyphRasterizer, RasterResult, RasterizationSession, StyleOptions};
use glyphmesh_geometry::PolygonMesh;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

/// Records a rasterizer call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterCall {
    OpenSession { font: Option<PathBuf> },
    Rasterize { body: String },
    CloseSession,
}

/// Mock rasterizer.
///
/// Sessions share the rasterizer's call log, so a test can inspect what a
/// build did after it returns.
///
/// # Example
///
/// ```rust
/// use glyphmesh::{FontAtlasBuilder, StyleOptions};
/// use glyphmesh_test_utils::MockRasterizer;
///
/// let mock = MockRasterizer::new();
/// let atlas = FontAtlasBuilder::new(&mock)
///     .build("ab", &StyleOptions::default())
///     .unwrap();
///
/// assert_eq!(atlas.len(), 2);
/// assert_eq!(mock.sessions_opened(), 1);
/// assert_eq!(mock.sessions_closed(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockRasterizer {
    calls: Arc<Mutex<Vec<RasterCall>>>,
    fonts: HashSet<PathBuf>,
    advances: HashMap<char, f32>,
    unprintable: HashSet<char>,
    broken: HashSet<char>,
    malformed: HashSet<char>,
    quads: bool,
}

/// Advance of characters without an override.
pub const DEFAULT_ADVANCE: f32 = 1.0;

/// Blank space on each side of a glyph box.
pub const SIDE_BEARING: f32 = 0.1;

impl MockRasterizer {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fonts: HashSet::new(),
            advances: HashMap::new(),
            unprintable: HashSet::new(),
            broken: HashSet::new(),
            malformed: HashSet::new(),
            quads: false,
        }
    }

    /// Accept a font path. Styles naming any other path fail to open.
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.fonts.insert(path.into());
        self
    }

    /// Override a character's advance.
    pub fn with_advance(mut self, character: char, advance: f32) -> Self {
        self.advances.insert(character, advance);
        self
    }

    /// Make a character produce no geometry, like whitespace.
    pub fn with_unprintable(mut self, character: char) -> Self {
        self.unprintable.insert(character);
        self
    }

    /// Make every body containing a character produce no geometry, as a
    /// tessellator rejecting the combined outline would.
    pub fn with_broken(mut self, character: char) -> Self {
        self.broken.insert(character);
        self
    }

    /// Give a character an extra two-vertex polygon.
    pub fn with_malformed(mut self, character: char) -> Self {
        self.malformed.insert(character);
        self
    }

    /// Emit boxes as quads instead of triangle pairs.
    pub fn with_quads(mut self) -> Self {
        self.quads = true;
        self
    }

    pub fn advance(&self, character: char) -> f32 {
        self.advances
            .get(&character)
            .copied()
            .unwrap_or(DEFAULT_ADVANCE)
    }

    /// Whether a character draws anything.
    pub fn is_printable(&self, character: char) -> bool {
        !character.is_whitespace() && !character.is_control() && !self.unprintable.contains(&character)
    }

    /// Get a copy of all recorded calls (for test assertions).
    pub fn calls(&self) -> Vec<RasterCall> {
        self.calls.lock().clone()
    }

    pub fn sessions_opened(&self) -> usize {
        self.count(|call| matches!(call, RasterCall::OpenSession { .. }))
    }

    pub fn sessions_closed(&self) -> usize {
        self.count(|call| matches!(call, RasterCall::CloseSession))
    }

    pub fn rasterize_count(&self) -> usize {
        self.count(|call| matches!(call, RasterCall::Rasterize { .. }))
    }

    /// Clear recorded calls (useful between test steps).
    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn count(&self, predicate: impl Fn(&RasterCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| predicate(call)).count()
    }
}

impl Default for MockRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterizer for MockRasterizer {
    type Session = MockSession;

    fn open_session(&self, style: &StyleOptions) -> AtlasResult<MockSession> {
        self.calls.lock().push(RasterCall::OpenSession {
            font: style.font.clone(),
        });

        if let Some(path) = &style.font
            && !self.fonts.contains(path)
        {
            return Err(AtlasError::FontResourceUnavailable {
                path: Some(path.clone()),
                reason: "Font file not found".into(),
            });
        }

        Ok(MockSession {
            rasterizer: self.clone(),
            scale: style.size,
            depth: style.extrude,
        })
    }
}

/// Session of a [`MockRasterizer`]. Records its own teardown.
pub struct MockSession {
    rasterizer: MockRasterizer,
    scale: f32,
    depth: f32,
}

impl MockSession {
    fn add_box(&self, mesh: &mut PolygonMesh, left: f32, right: f32, z: f32, flip: bool) {
        let corners = [
            Vec3::new(left, 0.0, z),
            Vec3::new(right, 0.0, z),
            Vec3::new(right, self.scale, z),
            Vec3::new(left, self.scale, z),
        ];
        let mut ids: Vec<u32> = corners.iter().map(|&p| mesh.add_vertex(p)).collect();
        if flip {
            ids.reverse();
        }

        if self.rasterizer.quads {
            mesh.add_polygon(ids);
        } else {
            mesh.add_polygon([ids[0], ids[1], ids[2]]);
            mesh.add_polygon([ids[0], ids[2], ids[3]]);
        }
    }
}

impl RasterizationSession for MockSession {
    fn rasterize(&mut self, body: &str) -> RasterResult {
        self.rasterizer.calls.lock().push(RasterCall::Rasterize {
            body: body.to_string(),
        });

        if body.chars().any(|c| self.rasterizer.broken.contains(&c)) {
            return RasterResult::Unprintable;
        }

        let mut mesh = PolygonMesh::new();
        let mut pen = 0.0_f32;

        for character in body.chars() {
            let advance = self.rasterizer.advance(character) * self.scale;
            if self.rasterizer.is_printable(character) {
                let left = pen + SIDE_BEARING * self.scale;
                let right = pen + advance - SIDE_BEARING * self.scale;

                if self.depth > 0.0 {
                    self.add_box(&mut mesh, left, right, self.depth, false);
                    self.add_box(&mut mesh, left, right, -self.depth, true);
                } else {
                    self.add_box(&mut mesh, left, right, 0.0, false);
                }

                if self.rasterizer.malformed.contains(&character) {
                    let a = mesh.add_vertex(Vec3::new(left, 0.0, 0.0));
                    let b = mesh.add_vertex(Vec3::new(right, 0.0, 0.0));
                    mesh.add_polygon([a, b]);
                }
            }
            pen += advance;
        }

        RasterResult::from_mesh(mesh)
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.rasterizer.calls.lock().push(RasterCall::CloseSession);
    }
}

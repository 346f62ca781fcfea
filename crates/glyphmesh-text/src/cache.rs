//! Glyph outline cache.
//!
//! Width measurement rasterizes the padding glyphs twice per character, so
//! the same outlines are requested over and over within one session. Outlines
//! are cached per glyph id, in font units.

use ahash::AHashMap;
use glyphmesh_geometry::Path;
use std::sync::Arc;

/// Cache of glyph outlines keyed by glyph id.
///
/// `None` entries record glyphs known to have no outline (spaces, controls).
#[derive(Default)]
pub struct OutlineCache {
    outlines: AHashMap<u16, Option<Arc<Path>>>,
    /// Statistics for monitoring cache performance
    pub hits: u64,
    pub misses: u64,
}

impl OutlineCache {
    /// Create a new empty outline cache.
    pub fn new() -> Self {
        Self {
            outlines: AHashMap::with_capacity(128),
            hits: 0,
            misses: 0,
        }
    }

    /// Get a cached outline or extract it.
    pub fn get_or_extract<F>(&mut self, glyph_id: u16, extract: F) -> Option<Arc<Path>>
    where
        F: FnOnce() -> Option<Path>,
    {
        if let Some(cached) = self.outlines.get(&glyph_id) {
            self.hits += 1;
            return cached.clone();
        }

        self.misses += 1;
        let outline = extract().map(Arc::new);
        self.outlines.insert(glyph_id, outline.clone());
        outline
    }

    /// Number of glyphs cached.
    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    /// Get the cache hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn clear(&mut self) {
        self.outlines.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

//! glyphmesh Text - font loading and glyph outlines
//!
//! This crate provides the font side of glyph rasterization:
//! - Font discovery through `fontdb` (system fonts, font directories)
//! - Font loading and validation, glyph outlines via `ttf-parser`
//! - Single-line shaping with horizontal advances and `kern` pair kerning
//! - A per-session glyph outline cache
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glyphmesh_text::{FontDatabase, OutlineCache, shape_text};
//!
//! let db = FontDatabase::new();
//! let font = db.first_font().expect("no fonts installed");
//! let mut cache = OutlineCache::new();
//!
//! let shaped = shape_text(&font, &mut cache, "gs").unwrap();
//! println!("advance: {} font units", shaped.advance);
//! ```

pub mod cache;
pub mod error;
pub mod font;
pub mod shaping;

pub use cache::OutlineCache;
pub use error::{TextError, TextResult};
pub use font::{FontDatabase, LoadedFont};
pub use shaping::{ShapedGlyph, ShapedText, glyph_outline, pair_kerning, shape_text};

//! Test utilities for glyphmesh.
//!
//! This crate provides a mock [`GlyphRasterizer`](glyphmesh::GlyphRasterizer)
//! so atlas construction can be tested without fonts.
//!
//! # Overview
//!
//! - [`MockRasterizer`] - Draws each printable character as a box in a
//!   fixed-advance cell and records every call
//! - [`RasterCall`] - The recorded calls, for assertions
//!
//! The rasterizer and its sessions share one call log behind a `Mutex`, so
//! assertions work through `&self` after the builder has consumed a borrow
//! of the mock.

pub mod mock_rasterizer;

pub use mock_rasterizer::*;

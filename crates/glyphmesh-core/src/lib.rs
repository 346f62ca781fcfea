//! glyphmesh Core
//!
//! Shared plumbing for the glyphmesh crates: logging setup, math types and
//! profiling hooks.

pub mod logging;
pub mod math;
pub mod profiling;

//! Card rendering module
//!
//! This module contains:
//! - Layout calculations shared between drawing and hit-testing
//! - Caption rasterization using ab_glyph
//! - Card composition using image and tiny-skia (preview and export)

pub mod geometry;
pub mod image;
pub mod text;

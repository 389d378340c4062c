//! Pure domain types with minimal dependencies
//!
//! This module contains core types used throughout the application.
//! Types here should have no framework dependencies (cosmic, iced, etc.)
//! so the card model can be exercised without a running UI.

pub mod background;
pub mod color;
pub mod geometry;
pub mod text_box;

pub use background::*;
pub use color::*;
pub use geometry::*;
pub use text_box::*;

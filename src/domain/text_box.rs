//! Text box entities placed on the card
//!
//! Coordinates are card-local logical pixels with the origin at the
//! top-left corner of the card.

use std::fmt;

use uuid::Uuid;

use super::color::TextColor;

/// Caption given to freshly added text boxes
pub const PLACEHOLDER_TEXT: &str = "Enter text";
/// Font size given to freshly added text boxes, and shown when nothing is selected
pub const DEFAULT_FONT_SIZE: f32 = 20.0;
/// Largest accepted font size; the card is only 700 pixels tall
pub const MAX_FONT_SIZE: f32 = 400.0;
/// Color given to freshly added text boxes, and shown when nothing is selected
pub const DEFAULT_COLOR: TextColor = TextColor::BLACK;

/// Unique identifier of a text box, never reused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextBoxId(Uuid);

impl TextBoxId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TextBoxId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TextBoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One movable caption on the card
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    pub id: TextBoxId,
    /// Offset of the top-left corner
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font_size: f32,
    pub color: TextColor,
}

impl TextBox {
    /// Create a text box at the card origin with default caption and style
    pub fn new(id: TextBoxId) -> Self {
        Self {
            id,
            x: 0.0,
            y: 0.0,
            text: PLACEHOLDER_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_COLOR,
        }
    }
}

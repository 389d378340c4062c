//! Shared layout calculations for text boxes
//!
//! Used by the card renderer for drawing and by the card canvas for
//! hit-testing, so what the user clicks matches what is drawn.

use crate::domain::{Point, Rect, TextBox, clamp_to_card};

use super::text::{TextRenderer, estimate_size};

/// Text box chrome constants
pub mod text_box {
    /// Space between the caption and the box edge in logical pixels
    pub const PADDING: f32 = 4.0;
    /// Minimum box width so short or empty captions stay clickable
    pub const MIN_WIDTH: f32 = 48.0;
    /// Minimum box height
    pub const MIN_HEIGHT: f32 = 24.0;
    /// Selection outline stroke width in logical pixels
    pub const OUTLINE: f32 = 2.0;
}

/// Remove handle constants
pub mod remove_handle {
    /// Offset of the handle's top-left corner from the box origin
    pub const OFFSET: f32 = -20.0;
    /// Diameter of the handle
    pub const SIZE: f32 = 16.0;
    /// Stroke width of the cross inside the handle
    pub const CROSS_THICKNESS: f32 = 2.0;
}

/// Bounds of a caption drawn at (x, y), in card coordinates
pub fn caption_bounds(
    text_box: &TextBox,
    x: f32,
    y: f32,
    fonts: Option<&TextRenderer>,
) -> Rect {
    let (w, h) = match fonts {
        Some(fonts) => fonts.measure(&text_box.text, text_box.font_size),
        None => estimate_size(&text_box.text, text_box.font_size),
    };
    Rect::from_xywh(
        x,
        y,
        (w + text_box::PADDING * 2.0).max(text_box::MIN_WIDTH),
        (h + text_box::PADDING * 2.0).max(text_box::MIN_HEIGHT),
    )
}

/// Bounds of the remove handle for a box whose origin is (x, y).
/// Pulled onto the card when the offset would put it past an edge.
pub fn remove_handle_bounds(x: f32, y: f32) -> Rect {
    let (left, top) = clamp_to_card(
        x + remove_handle::OFFSET,
        y + remove_handle::OFFSET,
        remove_handle::SIZE,
        remove_handle::SIZE,
    );
    Rect::from_xywh(left, top, remove_handle::SIZE, remove_handle::SIZE)
}

/// What lies under the pointer on the card
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hit {
    /// The remove handle of a text box
    RemoveHandle(usize),
    /// The body of a text box
    Caption(usize),
}

/// Hit-test text boxes from topmost (last added) to bottommost.
/// Remove handles take priority over captions.
pub fn hit_test(text_boxes: &[TextBox], point: Point, fonts: Option<&TextRenderer>) -> Option<Hit> {
    text_boxes
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, tb)| {
            remove_handle_bounds(tb.x, tb.y)
                .contains_point(point)
                .then_some(Hit::RemoveHandle(index))
        })
        .or_else(|| {
            text_boxes.iter().enumerate().rev().find_map(|(index, tb)| {
                caption_bounds(tb, tb.x, tb.y, fonts)
                    .contains_point(point)
                    .then_some(Hit::Caption(index))
            })
        })
}

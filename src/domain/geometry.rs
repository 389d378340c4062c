//! Geometric types for card regions and pointer positions

/// Width of the card in logical pixels
pub const CARD_WIDTH: u32 = 500;
/// Height of the card in logical pixels
pub const CARD_HEIGHT: u32 = 700;

/// A point in card-local logical coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Logical Size and Position of a rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Clamp the origin of a `width` x `height` area so all of it stays on the card
pub fn clamp_to_card(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    (
        x.clamp(0.0, (CARD_WIDTH as f32 - width).max(0.0)),
        y.clamp(0.0, (CARD_HEIGHT as f32 - height).max(0.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let rect = Rect::from_xywh(10.0, 10.0, 20.0, 5.0);
        assert!(rect.contains_point(Point::new(10.0, 10.0)));
        assert!(rect.contains_point(Point::new(29.9, 14.9)));
        assert!(!rect.contains_point(Point::new(30.0, 12.0)));
        assert!(!rect.contains_point(Point::new(12.0, 15.0)));
    }

    #[test]
    fn clamps_origin_to_card() {
        assert_eq!(clamp_to_card(-5.0, 900.0, 48.0, 24.0), (0.0, 676.0));
        assert_eq!(clamp_to_card(900.0, -1.0, 48.0, 24.0), (452.0, 0.0));
        assert_eq!(clamp_to_card(42.0, 17.5, 48.0, 24.0), (42.0, 17.5));
    }
}

//! Pointer tracking for moving text boxes
//!
//! The tracker owns the in-flight drag. Intermediate positions only feed the
//! preview; the card state hears about a drag once, when it completes.

use crate::domain::{Point, TextBoxId, clamp_to_card};
use crate::render::geometry::text_box::{MIN_HEIGHT, MIN_WIDTH};

/// Pointer travel (logical pixels) below which a press/release is a click
const CLICK_SLOP: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct ActiveDrag {
    id: TextBoxId,
    /// Pointer position at press
    grab: Point,
    /// Text box origin at press
    origin: Point,
    /// Latest pointer position
    current: Point,
    moved: bool,
}

impl ActiveDrag {
    /// Dragged origin, keeping at least a minimum-size box on the card so it can be grabbed again
    fn position(&self) -> (f32, f32) {
        clamp_to_card(
            self.origin.x + self.current.x - self.grab.x,
            self.origin.y + self.current.y - self.grab.y,
            MIN_WIDTH,
            MIN_HEIGHT,
        )
    }
}

/// Final rest position reported when a drag completes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragEnd {
    pub id: TextBoxId,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
    /// Last pointer position seen over the card
    pointer: Option<Point>,
}

impl DragTracker {
    /// Record the pointer position (the card reports moves, not positions on press)
    pub fn pointer_moved(&mut self, point: Point) {
        self.pointer = Some(point);
        if let Some(drag) = &mut self.active {
            drag.current = point;
            if (point.x - drag.grab.x).abs() > CLICK_SLOP
                || (point.y - drag.grab.y).abs() > CLICK_SLOP
            {
                drag.moved = true;
            }
        }
    }

    /// Last known pointer position over the card
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Begin dragging the text box `id` whose origin is `origin`
    pub fn press(&mut self, id: TextBoxId, origin: Point) {
        let Some(grab) = self.pointer else {
            return;
        };
        self.active = Some(ActiveDrag {
            id,
            grab,
            origin,
            current: grab,
            moved: false,
        });
    }

    /// Live offset of the dragged box, for the preview only
    pub fn preview(&self) -> Option<(TextBoxId, f32, f32)> {
        self.active
            .filter(|drag| drag.moved)
            .map(|drag| {
                let (x, y) = drag.position();
                (drag.id, x, y)
            })
    }

    /// End the drag. Returns the rest position if the pointer actually moved.
    pub fn release(&mut self) -> Option<DragEnd> {
        let drag = self.active.take()?;
        if !drag.moved {
            return None;
        }
        let (x, y) = drag.position();
        Some(DragEnd { id: drag.id, x, y })
    }

    /// Abandon a drag without reporting, e.g. when the pointer leaves the card
    pub fn cancel(&mut self) {
        self.active = None;
        self.pointer = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_without_motion_is_a_click() {
        let mut tracker = DragTracker::default();
        let id = TextBoxId::new();
        tracker.pointer_moved(Point::new(50.0, 50.0));
        tracker.press(id, Point::new(40.0, 40.0));
        tracker.pointer_moved(Point::new(51.0, 50.5));

        assert!(tracker.preview().is_none());
        assert_eq!(tracker.release(), None);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn drag_reports_only_final_position() {
        let mut tracker = DragTracker::default();
        let id = TextBoxId::new();
        tracker.pointer_moved(Point::new(50.0, 50.0));
        tracker.press(id, Point::new(40.0, 45.0));

        tracker.pointer_moved(Point::new(70.0, 60.0));
        assert_eq!(tracker.preview(), Some((id, 60.0, 55.0)));
        tracker.pointer_moved(Point::new(100.0, 150.0));

        assert_eq!(
            tracker.release(),
            Some(DragEnd {
                id,
                x: 90.0,
                y: 145.0
            })
        );
        assert_eq!(tracker.release(), None);
    }

    #[test]
    fn drag_is_clamped_to_card() {
        let mut tracker = DragTracker::default();
        let id = TextBoxId::new();
        tracker.pointer_moved(Point::new(10.0, 10.0));
        tracker.press(id, Point::new(0.0, 0.0));
        tracker.pointer_moved(Point::new(-100.0, 5000.0));

        let end = tracker.release().unwrap();
        assert_eq!((end.x, end.y), (0.0, 700.0 - MIN_HEIGHT));

        tracker.pointer_moved(Point::new(10.0, 10.0));
        tracker.press(id, Point::new(0.0, 0.0));
        tracker.pointer_moved(Point::new(5000.0, 5000.0));
        let end = tracker.release().unwrap();
        assert_eq!((end.x, end.y), (500.0 - MIN_WIDTH, 700.0 - MIN_HEIGHT));
    }

    #[test]
    fn press_without_known_pointer_is_ignored() {
        let mut tracker = DragTracker::default();
        tracker.press(TextBoxId::new(), Point::default());
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn cancel_drops_the_drag() {
        let mut tracker = DragTracker::default();
        tracker.pointer_moved(Point::new(10.0, 10.0));
        tracker.press(TextBoxId::new(), Point::default());
        tracker.pointer_moved(Point::new(80.0, 80.0));
        tracker.cancel();
        assert_eq!(tracker.release(), None);
    }
}

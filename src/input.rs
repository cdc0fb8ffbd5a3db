//! Per-frame mouse state.
//!
//! The window state machine is frame driven: it wants to know where the
//! pointer is, whether the left button is held, and whether it went down or up
//! since the previous frame. `MouseTracker` folds the stream of crossterm
//! mouse events into that shape.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;
use crate::ui::Projection;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseState {
    pub position: Point,
    /// Left button currently held.
    pub left_down: bool,
    /// Left button went down since the previous frame.
    pub left_pressed: bool,
    /// Left button went up since the previous frame.
    pub left_released: bool,
}

impl MouseState {
    pub fn idle(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn pressed(position: Point) -> Self {
        Self {
            position,
            left_down: true,
            left_pressed: true,
            left_released: false,
        }
    }

    pub fn held(position: Point) -> Self {
        Self {
            position,
            left_down: true,
            left_pressed: false,
            left_released: false,
        }
    }

    pub fn released(position: Point) -> Self {
        Self {
            position,
            left_down: false,
            left_pressed: false,
            left_released: true,
        }
    }
}

/// Accumulates raw mouse events between frames.
#[derive(Debug, Default)]
pub struct MouseTracker {
    position: Point,
    left_down: bool,
    pressed: bool,
    released: bool,
}

impl MouseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &MouseEvent, projection: &Projection) {
        self.position = projection.cell_to_point(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.left_down = true;
                self.pressed = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.left_down = false;
                self.released = true;
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.left_down = true;
            }
            _ => {}
        }
    }

    /// Produce this frame's state and clear the edge flags.
    pub fn take_frame(&mut self) -> MouseState {
        let state = MouseState {
            position: self.position,
            left_down: self.left_down,
            left_pressed: self.pressed,
            left_released: self.released,
        };
        self.pressed = false;
        self.released = false;
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect as CellRect;

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn press_and_release_edges_are_latched_once() {
        let projection = Projection::new(
            Size::new(100.0, 100.0),
            CellRect {
                x: 0,
                y: 0,
                width: 100,
                height: 100,
            },
        );
        let mut tracker = MouseTracker::new();
        tracker.handle_event(&event(MouseEventKind::Down(MouseButton::Left), 5, 6), &projection);
        tracker.handle_event(&event(MouseEventKind::Up(MouseButton::Left), 5, 6), &projection);
        let frame = tracker.take_frame();
        assert!(frame.left_pressed);
        assert!(frame.left_released);
        assert!(!frame.left_down);

        let next = tracker.take_frame();
        assert!(!next.left_pressed);
        assert!(!next.left_released);
    }

    #[test]
    fn drag_keeps_button_held() {
        let projection = Projection::new(
            Size::new(100.0, 100.0),
            CellRect {
                x: 0,
                y: 0,
                width: 100,
                height: 100,
            },
        );
        let mut tracker = MouseTracker::new();
        tracker.handle_event(&event(MouseEventKind::Down(MouseButton::Left), 1, 1), &projection);
        let _ = tracker.take_frame();
        tracker.handle_event(&event(MouseEventKind::Drag(MouseButton::Left), 9, 3), &projection);
        let frame = tracker.take_frame();
        assert!(frame.left_down);
        assert!(!frame.left_pressed);
        assert_eq!(frame.position, Point::new(9.0, 3.0));
    }
}

//! UiFrame: a thin wrapper around a ratatui buffer that clamps drawing to the
//! visible area, plus the projection from logical desktop pixels to terminal
//! cells.
//!
//! The window manager works in logical pixels (a 1920×1080 desktop by
//! default). The terminal renderer is an external immediate-mode surface with
//! far fewer cells, so every rectangle is projected before it is drawn and
//! every mouse cell is unprojected before it reaches the state machine.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::geometry::{Point, Rect, Size};

/// Wrapper around a ratatui `Buffer` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: CellRect,
    buffer: &'a mut Buffer,
    projection: Projection,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>, logical: Size) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self {
            area,
            buffer,
            projection: Projection::new(logical, area),
        }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Used by tests
    /// and offscreen rendering.
    pub fn from_parts(area: CellRect, buffer: &'a mut Buffer, logical: Size) -> Self {
        Self {
            area,
            buffer,
            projection: Projection::new(logical, area),
        }
    }

    pub fn area(&self) -> CellRect {
        self.area
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: CellRect) -> Option<CellRect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: CellRect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let bounds = self.area;
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }
}

/// Linear map between logical desktop pixels and terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    logical: Size,
    area: CellRect,
}

impl Projection {
    pub fn new(logical: Size, area: CellRect) -> Self {
        Self { logical, area }
    }

    fn scale(&self) -> (f32, f32) {
        if !self.logical.is_valid() || self.area.width == 0 || self.area.height == 0 {
            return (1.0, 1.0);
        }
        (
            self.area.width as f32 / self.logical.width,
            self.area.height as f32 / self.logical.height,
        )
    }

    /// Cells covered by a logical rectangle, clipped to the terminal area.
    /// Degenerate or invalid input maps to an empty rect.
    pub fn project(&self, rect: Rect) -> CellRect {
        if !rect.position().is_finite() || rect.is_empty() {
            return CellRect::default();
        }
        let (sx, sy) = self.scale();
        let x0 = (rect.x * sx).floor() + self.area.x as f32;
        let y0 = (rect.y * sy).floor() + self.area.y as f32;
        let x1 = (rect.right() * sx).ceil() + self.area.x as f32;
        let y1 = (rect.bottom() * sy).ceil() + self.area.y as f32;
        let left = x0.max(self.area.x as f32);
        let top = y0.max(self.area.y as f32);
        let right = x1.min(self.area.right() as f32);
        let bottom = y1.min(self.area.bottom() as f32);
        if right <= left || bottom <= top {
            return CellRect::default();
        }
        CellRect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }

    /// Top-left logical point of a terminal cell.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            column.saturating_sub(self.area.x) as f32 / sx,
            row.saturating_sub(self.area.y) as f32 / sy,
        )
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: CellRect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(width: u16, height: u16) -> CellRect {
        CellRect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn safe_set_string_writes_within_bounds() {
        let bounds = cells(10, 2);
        let mut buf = Buffer::empty(bounds);
        safe_set_string(&mut buf, bounds, 1, 0, "hello", Style::default());
        let cell = buf.cell_mut((1, 0)).expect("cell present");
        assert_eq!(cell.symbol(), "h");

        // outside bounds should be ignored (no panic)
        safe_set_string(&mut buf, bounds, 100, 0, "x", Style::default());
    }

    #[test]
    fn render_widget_clips_to_frame_area() {
        let area = cells(5, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf, Size::new(5.0, 3.0));

        struct FillWidget;
        impl Widget for FillWidget {
            fn render(self, area: CellRect, buf: &mut Buffer) {
                for y in area.y..area.y.saturating_add(area.height) {
                    for x in area.x..area.x.saturating_add(area.width) {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_symbol("A");
                        }
                    }
                }
            }
        }

        ui.render_widget(
            FillWidget,
            CellRect {
                x: 3,
                y: 1,
                width: 10,
                height: 10,
            },
        );
        assert_eq!(buf.cell((4, 2)).map(|c| c.symbol()), Some("A"));
        assert_eq!(buf.cell((2, 2)).map(|c| c.symbol()), Some(" "));
    }

    #[test]
    fn projection_scales_and_clips() {
        let p = Projection::new(Size::new(1920.0, 1080.0), cells(192, 54));
        assert_eq!(
            p.project(Rect::new(100.0, 40.0, 250.0, 400.0)),
            CellRect {
                x: 10,
                y: 2,
                width: 25,
                height: 20,
            }
        );
        let clipped = p.project(Rect::new(1900.0, 0.0, 200.0, 100.0));
        assert_eq!(clipped.right(), 192);
        assert_eq!(p.project(Rect::new(f32::NAN, 0.0, 5.0, 5.0)), CellRect::default());
    }

    #[test]
    fn cell_to_point_inverts_scale() {
        let p = Projection::new(Size::new(1920.0, 1080.0), cells(192, 54));
        assert_eq!(p.cell_to_point(10, 2), Point::new(100.0, 40.0));
    }
}

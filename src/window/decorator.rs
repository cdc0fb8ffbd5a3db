//! Window chrome: title-bar layout, button hit-testing and terminal rendering.
//!
//! Layout and hit-testing work in logical pixels so the state machine never
//! depends on the renderer. Rendering projects the same rectangles to cells.

use ratatui::layout::Rect as CellRect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Clear;

use crate::constants::{
    BUTTON_GAP, BUTTON_RESERVATION, BUTTON_SIZE, RESIZE_HANDLE_SIZE, TITLE_BAR_HEIGHT,
    TITLE_PADDING,
};
use crate::geometry::{Point, Rect};
use crate::ui::{UiFrame, truncate_to_width};

/// What a press at a point on a window would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Maximize,
    Minimize,
    Pin,
    Drag,
    Resize,
    Body,
    None,
}

/// Text measurement collaborator used to size the title bar.
pub trait TextMeasure: std::fmt::Debug {
    fn text_width(&self, text: &str) -> f32;
}

/// Fixed advance per character, matching a monospace title font.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 8.0 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance
    }
}

/// Narrowest width at which `title` and every control button fit.
pub fn min_width(title: &str, measure: &dyn TextMeasure) -> f32 {
    let measured = measure.text_width(title);
    let measured = if measured.is_finite() {
        measured.max(0.0)
    } else {
        0.0
    };
    measured + BUTTON_RESERVATION
}

/// Chrome rectangles for one window, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeLayout {
    pub title_bar: Rect,
    pub close: Rect,
    pub maximize: Rect,
    pub minimize: Rect,
    pub pin: Rect,
    pub resize_handle: Rect,
}

impl ChromeLayout {
    /// Buttons sit right-aligned in the title bar, close outermost.
    pub fn for_bounds(bounds: Rect) -> Self {
        let bar_height = TITLE_BAR_HEIGHT.min(bounds.height.max(0.0));
        let title_bar = Rect::new(bounds.x, bounds.y, bounds.width, bar_height);
        let button_y = bounds.y + (bar_height - BUTTON_SIZE).max(0.0) / 2.0;
        let button = |slot: usize| {
            let x = bounds.right()
                - TITLE_PADDING
                - BUTTON_SIZE
                - slot as f32 * (BUTTON_SIZE + BUTTON_GAP);
            Rect::new(x, button_y, BUTTON_SIZE, BUTTON_SIZE)
        };
        let resize_handle = Rect::new(
            bounds.right() - RESIZE_HANDLE_SIZE,
            bounds.bottom() - RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
            RESIZE_HANDLE_SIZE,
        );
        Self {
            title_bar,
            close: button(0),
            maximize: button(1),
            minimize: button(2),
            pin: button(3),
            resize_handle,
        }
    }

    pub fn hit_test(&self, bounds: Rect, point: Point) -> HeaderAction {
        if !bounds.contains(point) {
            return HeaderAction::None;
        }
        if self.close.contains(point) {
            HeaderAction::Close
        } else if self.maximize.contains(point) {
            HeaderAction::Maximize
        } else if self.minimize.contains(point) {
            HeaderAction::Minimize
        } else if self.pin.contains(point) {
            HeaderAction::Pin
        } else if self.title_bar.contains(point) {
            HeaderAction::Drag
        } else if self.resize_handle.contains(point) {
            HeaderAction::Resize
        } else {
            HeaderAction::Body
        }
    }

    pub fn button_rect(&self, action: HeaderAction) -> Option<Rect> {
        match action {
            HeaderAction::Close => Some(self.close),
            HeaderAction::Maximize => Some(self.maximize),
            HeaderAction::Minimize => Some(self.minimize),
            HeaderAction::Pin => Some(self.pin),
            HeaderAction::Resize => Some(self.resize_handle),
            _ => None,
        }
    }
}

/// Tooltip text for a hovered control, reflecting the window's current mode.
pub fn tooltip(action: HeaderAction, maximized: bool, pinned: bool) -> Option<&'static str> {
    match action {
        HeaderAction::Close => Some("Close"),
        HeaderAction::Maximize if maximized => Some("Restore"),
        HeaderAction::Maximize => Some("Maximize"),
        HeaderAction::Minimize => Some("Minimize"),
        HeaderAction::Pin if pinned => Some("Unpin"),
        HeaderAction::Pin => Some("Pin"),
        HeaderAction::Resize => Some("Resize"),
        _ => None,
    }
}

/// Per-draw facts about the window being decorated.
#[derive(Debug, Clone, Copy)]
pub struct ChromeState<'a> {
    pub title: &'a str,
    pub focused: bool,
    pub pinned: bool,
    pub maximized: bool,
    /// True while an open/close/minimize/restore transition is in flight;
    /// only the outline is drawn then.
    pub animating: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, bounds: Rect, state: ChromeState<'_>);

    fn render_highlight(
        &self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        hovered: HeaderAction,
        label: Option<&str>,
    );
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl WindowDecorator for DefaultDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, bounds: Rect, state: ChromeState<'_>) {
        let rect = frame.projection().project(bounds);
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        frame.render_widget(Clear, rect);

        let header_style = if state.focused {
            Style::default()
                .bg(crate::theme::header_focused_bg())
                .fg(crate::theme::header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::header_bg())
                .fg(crate::theme::header_fg())
        };
        let border_style = Style::default().fg(crate::theme::border_fg());

        draw_outline(frame, rect, border_style);
        if state.animating || rect.height < 3 || rect.width < 3 {
            return;
        }

        let header_y = rect.y.saturating_add(1);
        let inner_left = rect.x.saturating_add(1);
        let inner_width = rect.width.saturating_sub(2);
        let fill = " ".repeat(inner_width as usize);
        frame.set_string(inner_left, header_y, &fill, header_style);

        let layout = ChromeLayout::for_bounds(bounds);
        let projection = *frame.projection();
        let buttons_left = projection.project(layout.pin).x.max(inner_left);
        let title_room = buttons_left.saturating_sub(inner_left).saturating_sub(1);
        let marker = if state.pinned { "▲ " } else { "" };
        let title = truncate_to_width(&format!("{marker}{}", state.title), title_room as usize);
        frame.set_string(inner_left, header_y, &title, header_style);

        let glyphs = [
            (layout.pin, if state.pinned { "▲" } else { "△" }),
            (layout.minimize, "_"),
            (layout.maximize, if state.maximized { "❐" } else { "□" }),
            (layout.close, "×"),
        ];
        for (button, glyph) in glyphs {
            let cell = projection.project(button);
            if cell.width > 0 && cell.x >= inner_left {
                frame.set_string(cell.x, header_y, glyph, header_style);
            }
        }

        if !state.maximized {
            let grip = projection.project(layout.resize_handle);
            if grip.width > 0 {
                frame.set_string(
                    rect.right().saturating_sub(1),
                    rect.bottom().saturating_sub(1),
                    "◢",
                    border_style,
                );
            }
        }
    }

    fn render_highlight(
        &self,
        frame: &mut UiFrame<'_>,
        bounds: Rect,
        hovered: HeaderAction,
        label: Option<&str>,
    ) {
        let layout = ChromeLayout::for_bounds(bounds);
        let Some(button) = layout.button_rect(hovered) else {
            return;
        };
        let projection = *frame.projection();
        let cell = projection.project(button);
        if cell.width == 0 || cell.height == 0 {
            return;
        }
        let highlight = Style::default()
            .bg(crate::theme::highlight_bg())
            .fg(crate::theme::highlight_fg());
        if let Some(symbol) = frame
            .buffer_mut()
            .cell((cell.x, cell.y))
            .map(|c| c.symbol().to_string())
        {
            frame.set_string(cell.x, cell.y, &symbol, highlight);
        }
        if let Some(label) = label {
            let tip_y = cell.bottom();
            let tip_x = cell.x.saturating_sub(label.chars().count() as u16 / 2);
            let tip = format!(" {label} ");
            let tooltip_style = Style::default()
                .bg(crate::theme::tooltip_bg())
                .fg(crate::theme::tooltip_fg());
            frame.set_string(tip_x, tip_y, &tip, tooltip_style);
        }
    }
}

fn draw_outline(frame: &mut UiFrame<'_>, rect: CellRect, style: Style) {
    let right = rect.right().saturating_sub(1);
    let bottom = rect.bottom().saturating_sub(1);
    for x in rect.x..=right {
        let (top_glyph, bottom_glyph) = if x == rect.x {
            ("┌", "└")
        } else if x == right {
            ("┐", "┘")
        } else {
            ("─", "─")
        };
        frame.set_string(x, rect.y, top_glyph, style);
        if bottom != rect.y {
            frame.set_string(x, bottom, bottom_glyph, style);
        }
    }
    for y in rect.y.saturating_add(1)..bottom {
        frame.set_string(rect.x, y, "│", style);
        if right != rect.x {
            frame.set_string(right, y, "│", style);
        }
    }
}

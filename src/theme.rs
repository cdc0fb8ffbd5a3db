use ratatui::style::Color;

// Centralized theme colors for window chrome, the dock rail and the top bar.

// Window chrome
pub fn header_bg() -> Color {
    Color::DarkGray
}
pub fn header_focused_bg() -> Color {
    Color::Blue
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn border_fg() -> Color {
    Color::DarkGray
}

// Hover highlight / tooltip overlays
pub fn highlight_bg() -> Color {
    Color::Yellow
}
pub fn highlight_fg() -> Color {
    Color::Black
}
pub fn tooltip_bg() -> Color {
    Color::Gray
}
pub fn tooltip_fg() -> Color {
    Color::Black
}

// Dock rail
pub fn dock_bg() -> Color {
    Color::Rgb(40, 40, 48)
}
pub fn dock_icon_fg() -> Color {
    Color::Cyan
}
pub fn dock_icon_minimized_fg() -> Color {
    Color::DarkGray
}

// Top bar / menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}

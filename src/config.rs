//! Runtime configuration for a [`crate::window::WindowManager`].
//!
//! Values default to the tuning in [`crate::constants`]; the demo binary
//! overrides them from command-line flags.

use crate::constants::{
    CLOSE_SPEED, DOCK_THICKNESS, MIN_WINDOW_HEIGHT, MINIMIZE_SPEED, OPEN_SPEED, RESTORE_SPEED,
    TOP_BAR_HEIGHT, UNSTICK_THRESHOLD,
};
use crate::dock::DockEdge;
use crate::geometry::{Rect, Size};

/// Per-kind animation progress rates, in progress units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpeeds {
    pub open: f32,
    pub close: f32,
    pub minimize: f32,
    pub restore: f32,
}

impl Default for AnimationSpeeds {
    fn default() -> Self {
        Self {
            open: OPEN_SPEED,
            close: CLOSE_SPEED,
            minimize: MINIMIZE_SPEED,
            restore: RESTORE_SPEED,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WmConfig {
    pub screen: Size,
    /// Height of the menu strip across the top. Also the lowest `y` a window
    /// may be dragged to.
    pub top_bar_height: f32,
    pub dock_edge: DockEdge,
    pub dock_thickness: f32,
    pub unstick_threshold: f32,
    pub min_height: f32,
    pub speeds: AnimationSpeeds,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1920.0, 1080.0),
            top_bar_height: TOP_BAR_HEIGHT,
            dock_edge: DockEdge::Left,
            dock_thickness: DOCK_THICKNESS,
            unstick_threshold: UNSTICK_THRESHOLD,
            min_height: MIN_WINDOW_HEIGHT,
            speeds: AnimationSpeeds::default(),
        }
    }
}

impl WmConfig {
    pub fn with_screen(mut self, screen: Size) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_dock_edge(mut self, edge: DockEdge) -> Self {
        self.dock_edge = edge;
        self
    }

    /// Full screen rectangle.
    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen.width, self.screen.height)
    }

    /// Screen below the top bar; the region windows may occupy before the
    /// dock is taken into account.
    pub fn desktop_rect(&self) -> Rect {
        let top = self.top_bar_height.clamp(0.0, self.screen.height);
        Rect::new(0.0, top, self.screen.width, self.screen.height - top)
    }
}

//! Shared crate-wide constants.
//!
//! All lengths are logical screen pixels.

/// Height of the title bar strip that starts a drag.
pub const TITLE_BAR_HEIGHT: f32 = 30.0;

/// Side length of each square title-bar control button.
pub const BUTTON_SIZE: f32 = 20.0;

/// Horizontal gap between adjacent control buttons.
pub const BUTTON_GAP: f32 = 4.0;

/// Number of control buttons in the title bar (pin, minimize, maximize, close).
pub const BUTTON_COUNT: usize = 4;

/// Inset from the window edge to the title text and the button row.
pub const TITLE_PADDING: f32 = 8.0;

/// Width reserved on the title bar for the control buttons and paddings.
///
/// `min_width(title)` adds this to the measured title so the title and
/// every button always fit.
pub const BUTTON_RESERVATION: f32 =
    BUTTON_COUNT as f32 * (BUTTON_SIZE + BUTTON_GAP) + 3.0 * TITLE_PADDING;

/// Minimum window height: the title bar plus a sliver of content.
pub const MIN_WINDOW_HEIGHT: f32 = 80.0;

/// Side length of the square resize grip in the bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f32 = 16.0;

/// Drag distance from the press point required to pull a maximized window
/// out of the maximized state.
pub const UNSTICK_THRESHOLD: f32 = 100.0;

/// Two title-bar presses closer than this toggle maximize.
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Default size of a freshly registered window.
pub const DEFAULT_WINDOW_WIDTH: f32 = 250.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 400.0;

/// Position of the first registered window; later windows cascade by
/// `STAGGER_STEP` on both axes.
pub const STAGGER_ORIGIN_X: f32 = 100.0;
pub const STAGGER_ORIGIN_Y: f32 = 35.0;
pub const STAGGER_STEP: f32 = 30.0;

/// Height of the top bar (menu layer). Windows may not be dragged above it.
pub const TOP_BAR_HEIGHT: f32 = 30.0;

/// Thickness of the docked rail across its edge.
pub const DOCK_THICKNESS: f32 = 60.0;

/// Padding between the dock rail border and its icons.
pub const DOCK_ICON_PADDING: f32 = 6.0;

/// Progress advanced per second for each animation kind. Progress runs from
/// 0 to 1, so `1 / speed` is the duration in seconds regardless of how far
/// the window travels.
pub const OPEN_SPEED: f32 = 5.0;
pub const CLOSE_SPEED: f32 = 6.0;
pub const MINIMIZE_SPEED: f32 = 3.5;
pub const RESTORE_SPEED: f32 = 3.5;

/// Size of the fallback minimize target used when no dock icon exists.
pub const FALLBACK_ICON_SIZE: f32 = 48.0;

/// Progress distance at which an animation counts as complete.
pub const ANIMATION_EPSILON: f32 = 1e-4;

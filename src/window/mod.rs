pub mod animation;
pub mod decorator;

mod registry;
mod window_manager;

use std::fmt;

use crate::arbiter::FrameInputArbiter;
use crate::config::{AnimationSpeeds, WmConfig};
use crate::constants::{DOUBLE_CLICK_MS, FALLBACK_ICON_SIZE};
use crate::dock::{DockError, TaskbarDock, WorkArea};
use crate::geometry::{Point, Rect, Size, clamp_min_wins};
use crate::input::MouseState;
use crate::ui::UiFrame;

use animation::{Animation, AnimationKind};
use decorator::{ChromeLayout, ChromeState, HeaderAction, TextMeasure, WindowDecorator};

pub use registry::{RegistryError, WindowRegistry};
pub use window_manager::{MenuLayer, WindowManager};

/// Best-effort handle to the dock collaborator for the duration of one call.
pub type DockRef<'a> = Option<&'a mut (dyn TaskbarDock + 'static)>;

/// Opaque, stable window identity handed out by [`WindowRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowOptions {
    pub movable: bool,
    pub resizable: bool,
    /// Initial origin; the registry's stagger slot when `None`.
    pub position: Option<Point>,
    /// Initial size; the default window size when `None`.
    pub size: Option<Size>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            movable: true,
            resizable: true,
            position: None,
            size: None,
        }
    }
}

/// Geometry saved before maximize or minimize so it can be restored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    pub position: Point,
    pub size: Size,
    /// The window was maximized when the snapshot was taken.
    pub maximized: bool,
}

impl GeometrySnapshot {
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGrab {
    /// Pointer minus window origin at press time.
    pub offset: Point,
    pub press: Point,
    /// Drag started on a maximized window and has not crossed the unstick
    /// threshold yet; the window stays maximized until it does.
    pub unstick_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGrab {
    pub press: Point,
    pub start_position: Point,
    pub start_size: Size,
}

/// Exclusive window mode. `pinned` and the in-flight animation are tracked
/// separately on [`Window`].
///
/// A restore from the dock keeps the destination mode (`Normal` or
/// `Maximized`) while its animation runs; a minimize keeps `Minimized`
/// throughout and the window is hidden once the animation finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowState {
    /// Registered but not in the registry's z-order: before the first open
    /// and after a close animation completes.
    Closed,
    Opening,
    Normal,
    Dragging(DragGrab),
    Resizing(ResizeGrab),
    Maximized,
    Minimized,
    Closing,
}

/// Registry-level follow-up a window asks for after processing a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowRequest {
    BringToFront,
    TogglePin,
}

/// Terminal side effect of a completed animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    Opened,
    Minimized,
    Restored,
    Closed,
}

/// Behavior tuning shared by every window of a manager.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTuning {
    pub unstick_threshold: f32,
    pub min_height: f32,
    pub speeds: AnimationSpeeds,
}

impl From<&WmConfig> for WindowTuning {
    fn from(config: &WmConfig) -> Self {
        Self {
            unstick_threshold: config.unstick_threshold,
            min_height: config.min_height,
            speeds: config.speeds,
        }
    }
}

/// Inputs a window needs while it handles one frame of mouse input.
pub struct FrameContext<'a> {
    pub arbiter: &'a mut FrameInputArbiter,
    pub dock: DockRef<'a>,
    /// This window is the topmost visible window under the pointer.
    pub topmost: bool,
}

#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    title: String,
    position: Point,
    size: Size,
    z_order: u64,
    state: WindowState,
    pinned: bool,
    animation: Option<Animation>,
    pre_maximize: Option<GeometrySnapshot>,
    pre_minimize: Option<GeometrySnapshot>,
    minimize_target: Option<Rect>,
    movable: bool,
    resizable: bool,
    min_size: Size,
    default_rect: Rect,
    work: WorkArea,
    tuning: WindowTuning,
    clock: f32,
    last_title_press: Option<f32>,
    hover: HeaderAction,
}

impl Window {
    pub(crate) fn new(
        id: WindowId,
        title: impl Into<String>,
        options: &WindowOptions,
        measure: &dyn TextMeasure,
        default_rect: Rect,
        work: WorkArea,
        tuning: WindowTuning,
    ) -> Self {
        let title = title.into();
        let min_size = Size::new(decorator::min_width(&title, measure), tuning.min_height);
        let default_rect = Rect::new(
            default_rect.x,
            default_rect.y,
            default_rect.width.max(min_size.width),
            default_rect.height.max(min_size.height),
        );
        let initial = Rect::from_parts(
            options.position.unwrap_or(default_rect.position()),
            options.size.unwrap_or(default_rect.size()),
        )
        .sanitized(default_rect);
        Self {
            id,
            title,
            position: initial.position(),
            size: Size::new(
                initial.width.max(min_size.width),
                initial.height.max(min_size.height),
            ),
            z_order: 0,
            state: WindowState::Closed,
            pinned: false,
            animation: None,
            pre_maximize: None,
            pre_minimize: None,
            minimize_target: None,
            movable: options.movable,
            resizable: options.resizable,
            min_size,
            default_rect,
            work,
            tuning,
            clock: 0.0,
            last_title_press: None,
            hover: HeaderAction::None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Resting geometry, replaced by the safe default when it is unusable.
    pub fn bounds(&self) -> Rect {
        Rect::from_parts(self.position, self.size).sanitized(self.default_rect)
    }

    /// Geometry to draw this frame: the animated rectangle while a
    /// transition runs, otherwise [`Self::bounds`].
    pub fn render_bounds(&self) -> Rect {
        match &self.animation {
            Some(anim) => anim.current(),
            None => self.bounds(),
        }
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub fn pre_maximize(&self) -> Option<GeometrySnapshot> {
        self.pre_maximize
    }

    pub fn pre_minimize(&self) -> Option<GeometrySnapshot> {
        self.pre_minimize
    }

    pub fn is_open(&self) -> bool {
        self.state != WindowState::Closed
    }

    pub fn is_visible(&self) -> bool {
        match self.state {
            WindowState::Closed => false,
            WindowState::Minimized => self.animation.is_some(),
            _ => true,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_maximized(&self) -> bool {
        match self.state {
            WindowState::Maximized => true,
            WindowState::Dragging(grab) => grab.unstick_pending,
            _ => false,
        }
    }

    pub fn is_minimized(&self) -> bool {
        self.state == WindowState::Minimized
    }

    /// A drag or resize is in progress and owns the pointer until release.
    pub fn is_interacting(&self) -> bool {
        matches!(
            self.state,
            WindowState::Dragging(_) | WindowState::Resizing(_)
        )
    }

    /// Cached rank snapshot; the registry's list order is authoritative.
    pub fn z_rank(&self) -> u64 {
        self.z_order
    }

    pub fn hover(&self) -> HeaderAction {
        self.hover
    }

    pub(crate) fn set_z_order(&mut self, z: u64) {
        self.z_order = z;
    }

    pub(crate) fn set_pinned_flag(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Force the terminal state after the window left the z-order.
    pub(crate) fn mark_closed(&mut self) {
        self.pinned = false;
        self.state = WindowState::Closed;
        self.animation = None;
        self.hover = HeaderAction::None;
        self.pre_minimize = None;
        self.minimize_target = None;
    }

    fn layout(&self) -> ChromeLayout {
        ChromeLayout::for_bounds(self.bounds())
    }

    fn apply_rect(&mut self, rect: Rect) {
        self.position = rect.position();
        self.size = Size::new(
            rect.width.max(self.min_size.width),
            rect.height.max(self.min_size.height),
        );
    }

    fn snapshot(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            position: self.position,
            size: self.size,
            maximized: self.state == WindowState::Maximized,
        }
    }

    /// Replace unusable geometry with the safe default rectangle.
    pub(crate) fn repair_geometry(&mut self) {
        let rect = Rect::from_parts(self.position, self.size);
        if rect.is_valid() {
            return;
        }
        tracing::warn!(
            window_id = %self.id,
            ?rect,
            "invalid window geometry; resetting to default"
        );
        let fallback = self.work.correct_bounds(self.default_rect, self.min_size);
        self.apply_rect(fallback);
    }

    /// Start the open transition. Called by the registry when the window
    /// enters the z-order.
    pub(crate) fn open(&mut self) {
        self.pinned = false;
        self.hover = HeaderAction::None;
        self.last_title_press = None;
        self.pre_minimize = None;
        self.minimize_target = None;
        self.repair_geometry();
        let rect = self.work.correct_bounds(self.bounds(), self.min_size);
        self.apply_rect(rect);
        self.state = WindowState::Opening;
        self.animation = Some(Animation::open(self.bounds()));
        tracing::debug!(window_id = %self.id, title = %self.title, "opening window");
    }

    pub fn begin_drag(&mut self, mouse: Point) -> bool {
        if !self.movable || self.is_animating() {
            return false;
        }
        let unstick_pending = match self.state {
            WindowState::Normal => false,
            WindowState::Maximized => true,
            _ => return false,
        };
        let (dx, dy) = mouse.delta(self.position);
        self.state = WindowState::Dragging(DragGrab {
            offset: Point::new(dx, dy),
            press: mouse,
            unstick_pending,
        });
        true
    }

    /// Move a dragged window so the grab offset stays under `mouse`.
    pub fn drag_to(&mut self, mouse: Point) {
        let WindowState::Dragging(mut grab) = self.state else {
            return;
        };
        if !mouse.is_finite() {
            return;
        }
        if grab.unstick_pending {
            if mouse.distance(grab.press) <= self.tuning.unstick_threshold {
                return;
            }
            self.unstick(&mut grab, mouse);
        }
        let target = Point::new(mouse.x - grab.offset.x, mouse.y - grab.offset.y);
        self.position = self.work.clamp_drag_position(target, self.size);
        self.state = WindowState::Dragging(grab);
    }

    /// Leave the maximized state mid-drag, restoring the pre-maximize size
    /// and keeping the pointer at the same relative spot on the title bar.
    fn unstick(&mut self, grab: &mut DragGrab, mouse: Point) {
        let restored = self
            .pre_maximize
            .take()
            .map(|snap| snap.size)
            .unwrap_or(self.default_rect.size());
        let rel_x = if self.size.width > 0.0 {
            (grab.press.x - self.position.x) / self.size.width
        } else {
            0.5
        };
        let rel_y = grab.press.y - self.position.y;
        self.size = Size::new(
            restored.width.max(self.min_size.width),
            restored.height.max(self.min_size.height),
        );
        self.position = Point::new(mouse.x - rel_x * self.size.width, mouse.y - rel_y);
        let (dx, dy) = mouse.delta(self.position);
        grab.offset = Point::new(dx, dy);
        grab.unstick_pending = false;
        tracing::debug!(window_id = %self.id, "unmaximized by drag");
    }

    pub fn begin_resize(&mut self, mouse: Point) -> bool {
        if !self.resizable || self.is_animating() || self.state != WindowState::Normal {
            return false;
        }
        self.state = WindowState::Resizing(ResizeGrab {
            press: mouse,
            start_position: self.position,
            start_size: self.size,
        });
        true
    }

    pub fn resize_to(&mut self, mouse: Point) {
        let WindowState::Resizing(grab) = self.state else {
            return;
        };
        if !mouse.is_finite() {
            return;
        }
        let (dx, dy) = mouse.delta(grab.press);
        let screen = self.work.screen;
        self.size = Size::new(
            clamp_min_wins(
                grab.start_size.width + dx,
                self.min_size.width,
                screen.width - self.position.x,
            ),
            clamp_min_wins(
                grab.start_size.height + dy,
                self.min_size.height,
                screen.height - self.position.y,
            ),
        );
    }

    /// Release a drag or resize and run the boundary-correction pass.
    pub fn end_drag_or_resize(&mut self) {
        match self.state {
            WindowState::Dragging(grab) if grab.unstick_pending => {
                self.state = WindowState::Maximized;
            }
            WindowState::Dragging(_) | WindowState::Resizing(_) => {
                self.state = WindowState::Normal;
                let corrected = self.work.correct_bounds(self.bounds(), self.min_size);
                self.apply_rect(corrected);
            }
            _ => {}
        }
    }

    pub fn toggle_maximize(&mut self) -> bool {
        if self.is_animating() {
            return false;
        }
        match self.state {
            WindowState::Normal => {
                self.pre_maximize = Some(self.snapshot());
                self.apply_rect(self.work.free_area());
                self.state = WindowState::Maximized;
                tracing::debug!(window_id = %self.id, "maximized");
                true
            }
            WindowState::Maximized => {
                match self.pre_maximize.take() {
                    Some(snap) => self.apply_rect(snap.rect()),
                    None => {
                        tracing::warn!(
                            window_id = %self.id,
                            "no pre-maximize geometry; using default"
                        );
                        self.apply_rect(self.default_rect);
                    }
                }
                self.state = WindowState::Normal;
                let corrected = self.work.correct_bounds(self.bounds(), self.min_size);
                self.apply_rect(corrected);
                tracing::debug!(window_id = %self.id, "restored from maximized");
                true
            }
            _ => false,
        }
    }

    /// Start the minimize transition toward this window's dock icon.
    pub fn minimize(&mut self, dock: DockRef<'_>) -> bool {
        if self.is_animating()
            || !matches!(self.state, WindowState::Normal | WindowState::Maximized)
        {
            return false;
        }
        let snapshot = self.snapshot();
        self.pre_minimize = Some(snapshot);
        let icon = match dock {
            Some(dock) => {
                dock.store_pre_minimize(self.id, snapshot.position, snapshot.size);
                dock.ensure_icon_exists(self.id);
                dock.icon_rect_for(self.id)
            }
            None => None,
        };
        let target = icon.unwrap_or_else(|| {
            tracing::warn!(window_id = %self.id, "no dock icon; minimizing to fallback target");
            self.fallback_icon_rect()
        });
        self.minimize_target = Some(target);
        self.animation = Some(Animation::new(
            AnimationKind::Minimize,
            self.bounds(),
            target,
        ));
        self.state = WindowState::Minimized;
        tracing::debug!(window_id = %self.id, "minimizing");
        true
    }

    /// Start the restore transition from the dock icon back to the
    /// pre-minimize geometry.
    pub fn restore(&mut self, dock: DockRef<'_>) -> bool {
        if self.state != WindowState::Minimized || self.is_animating() {
            return false;
        }
        let stored = self.pre_minimize.take().or_else(|| {
            dock.as_deref().and_then(|d| d.fetch_pre_minimize(self.id)).map(
                |(position, size)| GeometrySnapshot {
                    position,
                    size,
                    maximized: false,
                },
            )
        });
        let snapshot = stored.unwrap_or_else(|| {
            tracing::warn!(window_id = %self.id, "no pre-minimize geometry; restoring in place");
            GeometrySnapshot {
                position: self.position,
                size: self.size,
                maximized: false,
            }
        });
        let start = dock
            .as_deref()
            .and_then(|d| d.icon_rect_for(self.id))
            .or(self.minimize_target)
            .unwrap_or_else(|| self.fallback_icon_rect());
        let target = if snapshot.maximized {
            self.work.free_area()
        } else {
            self.work
                .correct_bounds(snapshot.rect().sanitized(self.default_rect), self.min_size)
        };
        self.state = if snapshot.maximized {
            WindowState::Maximized
        } else {
            WindowState::Normal
        };
        self.animation = Some(Animation::new(AnimationKind::Restore, start, target));
        tracing::debug!(window_id = %self.id, "restoring");
        true
    }

    /// Start the close transition. A no-op while closing or already closed.
    pub fn begin_close(&mut self) -> bool {
        if matches!(self.state, WindowState::Closed | WindowState::Closing) {
            return false;
        }
        if matches!(self.state, WindowState::Opening) || self.is_animating() {
            return false;
        }
        let from = if self.is_visible() {
            self.bounds()
        } else {
            self.minimize_target
                .unwrap_or_else(|| self.fallback_icon_rect())
        };
        if matches!(self.state, WindowState::Maximized) {
            if let Some(snap) = self.pre_maximize.take() {
                self.apply_rect(snap.rect());
            }
        }
        self.state = WindowState::Closing;
        self.animation = Some(Animation::close(from));
        tracing::debug!(window_id = %self.id, "closing");
        true
    }

    /// Advance any running transition and perform its terminal side effect
    /// exactly once when it completes.
    pub fn tick_animation(&mut self, dt: f32, dock: DockRef<'_>) -> Option<AnimationEvent> {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
        let speeds = self.tuning.speeds;
        let anim = self.animation.as_mut()?;
        if !anim.advance(dt, &speeds) {
            return None;
        }
        let done = self.animation.take()?;
        let event = match done.kind {
            AnimationKind::Open => {
                self.apply_rect(done.target);
                self.state = WindowState::Normal;
                self.refit();
                tracing::debug!(window_id = %self.id, "opened");
                AnimationEvent::Opened
            }
            AnimationKind::Minimize => {
                if let Some(dock) = dock
                    && let Err(err) = dock.notify_minimized(self.id, true)
                {
                    log_dock_failure(self.id, &err);
                }
                tracing::debug!(window_id = %self.id, "minimized");
                AnimationEvent::Minimized
            }
            AnimationKind::Restore => {
                self.apply_rect(done.target);
                self.refit();
                if let Some(dock) = dock
                    && let Err(err) = dock.notify_minimized(self.id, false)
                {
                    log_dock_failure(self.id, &err);
                }
                tracing::debug!(window_id = %self.id, "restored");
                AnimationEvent::Restored
            }
            AnimationKind::Close => {
                self.state = WindowState::Closed;
                self.hover = HeaderAction::None;
                self.pre_minimize = None;
                self.minimize_target = None;
                if let Some(dock) = dock
                    && let Err(err) = dock.remove_icon(self.id)
                {
                    if matches!(err, DockError::UnknownIcon(_)) {
                        tracing::debug!(window_id = %self.id, "closed window had no dock icon");
                    } else {
                        log_dock_failure(self.id, &err);
                    }
                }
                tracing::debug!(window_id = %self.id, "closed");
                AnimationEvent::Closed
            }
        };
        Some(event)
    }

    /// Handle this frame's mouse input. Only one window acts on a given press
    /// edge: the claim goes through `ctx.arbiter`.
    pub fn update(&mut self, mouse: &MouseState, ctx: &mut FrameContext<'_>) -> Option<WindowRequest> {
        self.repair_geometry();
        self.hover = if ctx.topmost && self.is_visible() && !self.is_animating() {
            self.layout().hit_test(self.bounds(), mouse.position)
        } else {
            HeaderAction::None
        };
        if self.is_animating() {
            return None;
        }
        match self.state {
            WindowState::Dragging(_) => {
                if mouse.left_down {
                    self.drag_to(mouse.position);
                } else {
                    self.end_drag_or_resize();
                }
                return None;
            }
            WindowState::Resizing(_) => {
                if mouse.left_down {
                    self.resize_to(mouse.position);
                } else {
                    self.end_drag_or_resize();
                }
                return None;
            }
            WindowState::Normal | WindowState::Maximized => {}
            _ => return None,
        }
        if !mouse.left_pressed || !ctx.topmost {
            return None;
        }
        if !ctx.arbiter.try_claim_for_window() {
            return None;
        }
        self.handle_press(mouse.position, ctx.dock.as_deref_mut())
    }

    fn handle_press(&mut self, point: Point, dock: DockRef<'_>) -> Option<WindowRequest> {
        match self.layout().hit_test(self.bounds(), point) {
            HeaderAction::Close => {
                self.begin_close();
                None
            }
            HeaderAction::Maximize => {
                self.toggle_maximize();
                Some(WindowRequest::BringToFront)
            }
            HeaderAction::Minimize => {
                self.minimize(dock);
                None
            }
            HeaderAction::Pin => Some(WindowRequest::TogglePin),
            HeaderAction::Drag => {
                let double_click = self.last_title_press.is_some_and(|prev| {
                    (self.clock - prev) * 1000.0 <= DOUBLE_CLICK_MS as f32
                });
                if double_click {
                    self.last_title_press = None;
                    self.toggle_maximize();
                } else {
                    self.last_title_press = Some(self.clock);
                    self.begin_drag(point);
                }
                Some(WindowRequest::BringToFront)
            }
            HeaderAction::Resize => {
                self.begin_resize(point);
                Some(WindowRequest::BringToFront)
            }
            HeaderAction::Body => Some(WindowRequest::BringToFront),
            HeaderAction::None => None,
        }
    }

    pub fn on_screen_resized(&mut self, screen: Size) {
        self.work.screen = screen;
        self.refit();
    }

    pub fn on_dock_edge_changed(&mut self, reserved: Rect) {
        self.work.reserved = reserved;
        self.refit();
    }

    fn refit(&mut self) {
        if let Some(anim) = self.animation.as_mut() {
            // Open and restore land on their target; keep it inside the work area.
            if matches!(anim.kind, AnimationKind::Open | AnimationKind::Restore) {
                anim.target = if self.state == WindowState::Maximized {
                    self.work.free_area()
                } else {
                    self.work.correct_bounds(anim.target, self.min_size)
                };
            }
            return;
        }
        match self.state {
            WindowState::Maximized => self.apply_rect(self.work.free_area()),
            WindowState::Normal => {
                let corrected = self.work.correct_bounds(self.bounds(), self.min_size);
                self.apply_rect(corrected);
            }
            _ => {}
        }
    }

    fn fallback_icon_rect(&self) -> Rect {
        let screen = self.work.screen;
        Rect::centered(
            Point::new(screen.width / 2.0, screen.height - FALLBACK_ICON_SIZE / 2.0),
            Size::new(FALLBACK_ICON_SIZE, FALLBACK_ICON_SIZE),
        )
    }

    pub fn draw(&self, frame: &mut UiFrame<'_>, decorator: &dyn WindowDecorator, focused: bool) {
        if !self.is_visible() {
            return;
        }
        decorator.render_window(
            frame,
            self.render_bounds(),
            ChromeState {
                title: &self.title,
                focused,
                pinned: self.pinned,
                maximized: self.is_maximized(),
                animating: self.is_animating(),
            },
        );
    }

    pub fn draw_highlight_overlay(&self, frame: &mut UiFrame<'_>, decorator: &dyn WindowDecorator) {
        if !self.is_visible() || self.is_animating() {
            return;
        }
        let label = decorator::tooltip(self.hover, self.is_maximized(), self.pinned);
        decorator.render_highlight(frame, self.bounds(), self.hover, label);
    }
}

fn log_dock_failure(id: WindowId, err: &DockError) {
    tracing::warn!(window_id = %id, error = %err, "dock notification failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
    use crate::dock::{DockEdge, RailDock};
    use decorator::MonospaceMeasure;

    fn work() -> WorkArea {
        WorkArea::new(
            Size::new(1920.0, 1080.0),
            30.0,
            Rect::new(0.0, 30.0, 60.0, 1050.0),
        )
    }

    fn window_at(x: f32, y: f32) -> Window {
        let config = WmConfig::default();
        let mut w = Window::new(
            WindowId::from_raw(1),
            "Notes",
            &WindowOptions {
                position: Some(Point::new(x, y)),
                ..WindowOptions::default()
            },
            &MonospaceMeasure::default(),
            Rect::new(100.0, 35.0, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            work(),
            WindowTuning::from(&config),
        );
        w.state = WindowState::Normal;
        w
    }

    fn finish(w: &mut Window, mut dock: DockRef<'_>) -> Option<AnimationEvent> {
        for _ in 0..1000 {
            if let Some(ev) = w.tick_animation(0.016, dock.as_deref_mut()) {
                return Some(ev);
            }
        }
        None
    }

    #[test]
    fn open_animation_reaches_normal() {
        let mut w = window_at(100.0, 35.0);
        w.state = WindowState::Closed;
        w.open();
        assert_eq!(w.state(), WindowState::Opening);
        assert!(w.is_animating());
        assert!(!w.begin_drag(Point::new(120.0, 40.0)));
        assert_eq!(finish(&mut w, None), Some(AnimationEvent::Opened));
        assert_eq!(w.state(), WindowState::Normal);
        assert!(!w.is_animating());
    }

    #[test]
    fn drag_clamps_to_screen_and_out_of_dock() {
        let mut w = window_at(100.0, 35.0);
        assert!(w.begin_drag(Point::new(150.0, 45.0)));
        w.drag_to(Point::new(0.0, 45.0));
        assert_eq!(w.position(), Point::new(60.0, 35.0));
        w.drag_to(Point::new(3000.0, 5000.0));
        assert_eq!(w.position(), Point::new(1920.0 - 250.0, 1080.0 - 400.0));
        w.end_drag_or_resize();
        assert_eq!(w.state(), WindowState::Normal);
    }

    #[test]
    fn immovable_window_refuses_drag() {
        let mut w = window_at(100.0, 35.0);
        w.movable = false;
        assert!(!w.begin_drag(Point::new(150.0, 45.0)));
        assert_eq!(w.state(), WindowState::Normal);
    }

    #[test]
    fn resize_respects_minimums_and_screen() {
        let mut w = window_at(300.0, 100.0);
        assert!(w.begin_resize(Point::new(540.0, 490.0)));
        w.resize_to(Point::new(0.0, 0.0));
        assert_eq!(w.size(), w.min_size());
        w.resize_to(Point::new(5000.0, 5000.0));
        assert_eq!(w.size(), Size::new(1920.0 - 300.0, 1080.0 - 100.0));
        w.end_drag_or_resize();
        assert!(w.size().width >= w.min_size().width);
    }

    #[test]
    fn maximized_window_cannot_resize() {
        let mut w = window_at(100.0, 150.0);
        assert!(w.toggle_maximize());
        assert!(!w.begin_resize(Point::new(500.0, 500.0)));
    }

    #[test]
    fn maximize_fills_free_area_and_restores() {
        let mut w = window_at(100.0, 150.0);
        assert!(w.toggle_maximize());
        assert_eq!(w.bounds(), Rect::new(60.0, 30.0, 1860.0, 1050.0));
        assert!(w.toggle_maximize());
        assert_eq!(w.bounds(), Rect::new(100.0, 150.0, 250.0, 400.0));
    }

    #[test]
    fn short_drag_keeps_window_maximized() {
        let mut w = window_at(100.0, 150.0);
        w.toggle_maximize();
        assert!(w.begin_drag(Point::new(500.0, 40.0)));
        w.drag_to(Point::new(550.0, 40.0));
        assert!(w.is_maximized());
        w.end_drag_or_resize();
        assert_eq!(w.state(), WindowState::Maximized);
        assert_eq!(w.bounds(), Rect::new(60.0, 30.0, 1860.0, 1050.0));
    }

    #[test]
    fn minimize_without_dock_uses_fallback_target() {
        let mut w = window_at(100.0, 150.0);
        assert!(w.minimize(None));
        let target = w.animation().map(|a| a.target).expect("animating");
        assert_eq!(target.size(), Size::new(FALLBACK_ICON_SIZE, FALLBACK_ICON_SIZE));
        assert_eq!(finish(&mut w, None), Some(AnimationEvent::Minimized));
        assert!(!w.is_visible());
        assert!(w.is_open());
    }

    #[test]
    fn minimize_notifies_dock_on_completion() {
        let mut dock = RailDock::new(DockEdge::Left, 60.0, Rect::new(0.0, 30.0, 1920.0, 1050.0));
        let mut w = window_at(100.0, 150.0);
        assert!(w.minimize(Some(&mut dock)));
        assert!(!dock.is_minimized(w.id()));
        assert_eq!(
            w.animation().map(|a| a.target),
            dock.icon_rect_for(w.id())
        );
        assert_eq!(finish(&mut w, Some(&mut dock)), Some(AnimationEvent::Minimized));
        assert!(dock.is_minimized(w.id()));

        assert!(w.restore(Some(&mut dock)));
        assert_eq!(finish(&mut w, Some(&mut dock)), Some(AnimationEvent::Restored));
        assert!(!dock.is_minimized(w.id()));
        assert_eq!(w.bounds(), Rect::new(100.0, 150.0, 250.0, 400.0));
    }

    #[test]
    fn restore_returns_to_maximized_mode() {
        let mut w = window_at(100.0, 150.0);
        w.toggle_maximize();
        w.minimize(None);
        finish(&mut w, None);
        assert!(w.restore(None));
        assert_eq!(w.state(), WindowState::Maximized);
        finish(&mut w, None);
        assert_eq!(w.bounds(), Rect::new(60.0, 30.0, 1860.0, 1050.0));
        assert!(w.toggle_maximize());
        assert_eq!(w.bounds(), Rect::new(100.0, 150.0, 250.0, 400.0));
    }

    #[test]
    fn close_is_single_shot() {
        let mut w = window_at(100.0, 150.0);
        assert!(w.begin_close());
        assert!(!w.begin_close());
        assert_eq!(finish(&mut w, None), Some(AnimationEvent::Closed));
        assert_eq!(w.state(), WindowState::Closed);
        assert!(!w.begin_close());
        assert_eq!(w.tick_animation(0.016, None), None);
    }

    #[test]
    fn input_is_ignored_while_animating() {
        let mut w = window_at(100.0, 150.0);
        w.minimize(None);
        let mut arbiter = FrameInputArbiter::new();
        let mut ctx = FrameContext {
            arbiter: &mut arbiter,
            dock: None,
            topmost: true,
        };
        let req = w.update(&MouseState::pressed(Point::new(120.0, 160.0)), &mut ctx);
        assert_eq!(req, None);
        assert!(arbiter.click_available());
    }

    #[test]
    fn nan_geometry_is_reset_to_default() {
        let mut w = window_at(100.0, 150.0);
        w.position = Point::new(f32::NAN, 10.0);
        assert_eq!(w.bounds(), Rect::new(100.0, 35.0, 250.0, 400.0));
        w.size = Size::new(-5.0, 0.0);
        w.repair_geometry();
        assert!(w.bounds().is_valid());
        assert_eq!(w.position(), Point::new(100.0, 35.0));
        assert!(w.size().width >= w.min_size().width);
    }

    #[test]
    fn title_bar_double_click_toggles_maximize() {
        let mut w = window_at(100.0, 150.0);
        let mut arbiter = FrameInputArbiter::new();
        let press = MouseState::pressed(Point::new(130.0, 160.0));
        let release = MouseState::released(Point::new(130.0, 160.0));

        let mut ctx = FrameContext {
            arbiter: &mut arbiter,
            dock: None,
            topmost: true,
        };
        assert_eq!(w.update(&press, &mut ctx), Some(WindowRequest::BringToFront));
        ctx.arbiter.reset_frame();
        w.update(&release, &mut ctx);
        w.tick_animation(0.1, None);
        ctx.arbiter.reset_frame();
        w.update(&press, &mut ctx);
        assert_eq!(w.state(), WindowState::Maximized);
    }

    #[test]
    fn screen_resize_refits_window() {
        let mut w = window_at(1500.0, 600.0);
        w.on_screen_resized(Size::new(1280.0, 720.0));
        let b = w.bounds();
        assert!(b.right() <= 1280.0);
        assert!(b.bottom() <= 720.0);
        assert_eq!(b.size(), Size::new(250.0, 400.0));
    }

    #[test]
    fn dock_edge_change_pushes_window_out() {
        let mut w = window_at(100.0, 700.0);
        w.on_dock_edge_changed(Rect::new(0.0, 1020.0, 1920.0, 60.0));
        assert_eq!(w.bounds().bottom(), 1020.0);
    }

    #[test]
    fn screen_resize_during_open_retargets_animation() {
        let mut w = window_at(1500.0, 600.0);
        w.state = WindowState::Closed;
        w.open();
        w.tick_animation(0.016, None);
        assert!(w.is_animating());
        w.on_screen_resized(Size::new(1280.0, 720.0));
        assert_eq!(finish(&mut w, None), Some(AnimationEvent::Opened));
        assert_eq!(w.bounds(), Rect::new(1030.0, 320.0, 250.0, 400.0));
    }

    #[test]
    fn dock_edge_change_during_restore_keeps_window_out_of_rail() {
        let desktop = Rect::new(0.0, 30.0, 1920.0, 1050.0);
        let mut dock = RailDock::new(DockEdge::Left, 60.0, desktop);
        let mut w = window_at(300.0, 670.0);
        assert!(w.minimize(Some(&mut dock)));
        finish(&mut w, Some(&mut dock));
        assert!(w.restore(Some(&mut dock)));
        w.tick_animation(0.016, Some(&mut dock));
        assert!(w.is_animating());

        dock.relayout(desktop, DockEdge::Bottom);
        w.on_dock_edge_changed(dock.reserved_rect());
        assert_eq!(finish(&mut w, Some(&mut dock)), Some(AnimationEvent::Restored));
        assert_eq!(w.bounds(), Rect::new(300.0, 620.0, 250.0, 400.0));
    }

    #[test]
    fn screen_resize_during_maximized_restore_lands_on_new_free_area() {
        let mut w = window_at(100.0, 150.0);
        assert!(w.toggle_maximize());
        assert!(w.minimize(None));
        finish(&mut w, None);
        assert!(w.restore(None));
        w.on_screen_resized(Size::new(1280.0, 720.0));
        finish(&mut w, None);
        assert_eq!(w.state(), WindowState::Maximized);
        assert_eq!(w.bounds(), Rect::new(60.0, 30.0, 1220.0, 690.0));
    }
}

use std::sync::Arc;

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear};

use super::decorator::{DefaultDecorator, MonospaceMeasure, TextMeasure, WindowDecorator};
use super::registry::{RegistryError, WindowRegistry};
use super::{AnimationEvent, FrameContext, Window, WindowId, WindowOptions, WindowRequest, WindowTuning};
use crate::arbiter::FrameInputArbiter;
use crate::config::WmConfig;
use crate::dock::{DockEdge, TaskbarDock, WorkArea};
use crate::geometry::{Point, Rect, Size};
use crate::input::MouseState;
use crate::ui::UiFrame;

/// Overlay that sees the mouse before any window does, such as a top-bar
/// menu. Claiming the click through the arbiter hides it from windows.
pub trait MenuLayer: std::fmt::Debug {
    fn update(&mut self, mouse: &MouseState, arbiter: &mut FrameInputArbiter);

    /// Window the layer asked to bring forward during its last update.
    fn take_activation(&mut self) -> Option<WindowId> {
        None
    }

    fn draw(&self, _frame: &mut UiFrame<'_>) {}
}

/// Drives every registered window through one frame at a time: menu layer,
/// hit-testing, click dispatch, registry reordering, animation ticks and the
/// draw passes.
#[derive(Debug)]
pub struct WindowManager {
    config: WmConfig,
    registry: WindowRegistry,
    dock: Option<Box<dyn TaskbarDock>>,
    arbiter: FrameInputArbiter,
    menu: Option<Box<dyn MenuLayer>>,
    decorator: Arc<dyn WindowDecorator>,
    measure: Arc<dyn TextMeasure>,
    focused: Option<WindowId>,
}

impl WindowManager {
    pub fn new(config: WmConfig, mut dock: Option<Box<dyn TaskbarDock>>) -> Self {
        if let Some(dock) = dock.as_deref_mut() {
            dock.relayout(config.desktop_rect(), config.dock_edge);
        }
        let reserved = dock
            .as_deref()
            .map(|d| d.reserved_rect())
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        let work = WorkArea::new(config.screen, config.top_bar_height, reserved);
        Self {
            registry: WindowRegistry::new(work, WindowTuning::from(&config)),
            config,
            dock,
            arbiter: FrameInputArbiter::new(),
            menu: None,
            decorator: Arc::new(DefaultDecorator),
            measure: Arc::new(MonospaceMeasure::default()),
            focused: None,
        }
    }

    pub fn set_decorator(&mut self, decorator: Arc<dyn WindowDecorator>) {
        self.decorator = decorator;
    }

    /// Measurement used for titles registered from now on.
    pub fn set_text_measure(&mut self, measure: Arc<dyn TextMeasure>) {
        self.measure = measure;
    }

    pub fn set_menu_layer(&mut self, menu: Box<dyn MenuLayer>) {
        self.menu = Some(menu);
    }

    pub fn config(&self) -> &WmConfig {
        &self.config
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WindowRegistry {
        &mut self.registry
    }

    pub fn dock(&self) -> Option<&dyn TaskbarDock> {
        self.dock.as_deref()
    }

    pub fn arbiter(&self) -> &FrameInputArbiter {
        &self.arbiter
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.registry.get(id)
    }

    /// Window most recently brought forward by a click or activation.
    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn register(&mut self, title: &str, options: WindowOptions) -> Result<WindowId, RegistryError> {
        self.registry.register(title, options, self.measure.as_ref())
    }

    /// Register a window and show it immediately.
    pub fn open(&mut self, title: &str, options: WindowOptions) -> Result<WindowId, RegistryError> {
        let id = self.register(title, options)?;
        self.set_visible(id, true)?;
        Ok(id)
    }

    /// `true` reopens a closed window or restores a minimized one and focuses
    /// it; `false` starts the close transition.
    pub fn set_visible(&mut self, id: WindowId, visible: bool) -> Result<(), RegistryError> {
        let window = self.registry.get_mut(id).ok_or(RegistryError::UnknownWindow(id))?;
        if !visible {
            window.begin_close();
            return Ok(());
        }
        if window.is_minimized() {
            window.restore(self.dock.as_deref_mut());
        } else if !self.registry.is_open(id) {
            self.registry.reopen(id)?;
        }
        self.bring_to_front(id);
        Ok(())
    }

    /// Close `id` at once, without the close animation. Its dock icon goes
    /// with it.
    pub fn close_immediately(&mut self, id: WindowId) {
        self.registry.close(id, self.dock.as_deref_mut());
        if self.focused == Some(id) {
            self.focused = self.fallback_focus(Some(id));
        }
    }

    pub fn bring_to_front(&mut self, id: WindowId) -> bool {
        if !self.registry.bring_to_front(id) {
            return false;
        }
        if self.focused != Some(id) {
            tracing::debug!(window_id = %id, "focused");
        }
        self.focused = Some(id);
        true
    }

    /// Bring `id` forward on behalf of another component, exactly as a click
    /// on its dock icon would: reopen if closed, restore if minimized.
    pub fn handle_external_activation_request(&mut self, id: WindowId) -> Result<(), RegistryError> {
        tracing::debug!(window_id = %id, "activation requested");
        self.set_visible(id, true)
    }

    pub fn set_pinned(&mut self, id: WindowId, pinned: bool) -> bool {
        self.registry.set_pinned(id, pinned)
    }

    pub fn minimize(&mut self, id: WindowId) -> bool {
        let Some(window) = self.registry.get_mut(id) else {
            return false;
        };
        let started = window.minimize(self.dock.as_deref_mut());
        if started && self.focused == Some(id) {
            self.focused = self.fallback_focus(Some(id));
        }
        started
    }

    pub fn toggle_maximize(&mut self, id: WindowId) -> bool {
        let toggled = self
            .registry
            .get_mut(id)
            .is_some_and(Window::toggle_maximize);
        if toggled {
            self.bring_to_front(id);
        }
        toggled
    }

    pub fn bounds(&self, id: WindowId) -> Option<Rect> {
        self.registry.get(id).map(Window::bounds)
    }

    pub fn is_visible(&self, id: WindowId) -> bool {
        self.registry.get(id).is_some_and(Window::is_visible)
    }

    pub fn is_pinned(&self, id: WindowId) -> bool {
        self.registry.get(id).is_some_and(Window::is_pinned)
    }

    pub fn is_animating(&self, id: WindowId) -> bool {
        self.registry.get(id).is_some_and(Window::is_animating)
    }

    pub fn z_rank(&self, id: WindowId) -> Option<u64> {
        self.registry.get(id).map(Window::z_rank)
    }

    pub fn topmost_under_point(&self, point: Point) -> Option<WindowId> {
        self.registry.topmost_under_point(point)
    }

    /// Run one frame of input and animation. Returns the transitions that
    /// completed this frame.
    pub fn update(&mut self, mouse: &MouseState, dt: f32) -> Vec<(WindowId, AnimationEvent)> {
        self.arbiter.reset_frame();

        let mut activation = None;
        if let Some(menu) = self.menu.as_deref_mut() {
            menu.update(mouse, &mut self.arbiter);
            activation = menu.take_activation();
        }
        if activation.is_none() {
            activation = self.dock_click(mouse);
        }
        if let Some(id) = activation
            && let Err(err) = self.handle_external_activation_request(id)
        {
            tracing::warn!(window_id = %id, error = %err, "activation failed");
        }

        let topmost = self.registry.topmost_under_point(mouse.position);
        let ids: Vec<WindowId> = self.registry.order().iter().rev().copied().collect();
        let mut requests = Vec::new();
        for id in ids {
            let Some(window) = self.registry.get_mut(id) else {
                continue;
            };
            let mut ctx = FrameContext {
                arbiter: &mut self.arbiter,
                dock: self.dock.as_deref_mut(),
                topmost: topmost == Some(id),
            };
            if let Some(request) = window.update(mouse, &mut ctx) {
                requests.push((id, request));
            }
        }
        for (id, request) in requests {
            match request {
                WindowRequest::BringToFront => {
                    self.bring_to_front(id);
                }
                WindowRequest::TogglePin => {
                    let pinned = self.is_pinned(id);
                    self.set_pinned(id, !pinned);
                }
            }
        }

        let events = self.registry.tick_all(dt, self.dock.as_deref_mut());
        for (id, event) in &events {
            if matches!(event, AnimationEvent::Closed | AnimationEvent::Minimized)
                && self.focused == Some(*id)
            {
                self.focused = self.fallback_focus(Some(*id));
            }
        }
        // Minimizing by button does not go through `minimize` above.
        if let Some(id) = self.focused
            && self.registry.get(id).is_some_and(Window::is_minimized)
        {
            self.focused = self.fallback_focus(Some(id));
        }
        events
    }

    /// A press on a dock icon claims the click and activates its window.
    fn dock_click(&mut self, mouse: &MouseState) -> Option<WindowId> {
        if !mouse.left_pressed || !self.arbiter.click_available() {
            return None;
        }
        let dock = self.dock.as_deref()?;
        if !dock.reserved_rect().contains(mouse.position) {
            return None;
        }
        self.arbiter.claim_for_menu();
        dock.icon_at(mouse.position)
    }

    fn fallback_focus(&self, excluding: Option<WindowId>) -> Option<WindowId> {
        self.registry
            .iter()
            .rev()
            .find(|w| Some(w.id()) != excluding && w.is_visible() && !w.is_minimized())
            .map(Window::id)
    }

    pub fn on_screen_resized(&mut self, screen: Size) {
        if !screen.is_valid() {
            tracing::warn!(?screen, "ignoring invalid screen size");
            return;
        }
        self.config.screen = screen;
        self.registry.on_screen_resized(screen);
        self.relayout_dock();
        tracing::debug!(?screen, "screen resized");
    }

    pub fn set_dock_edge(&mut self, edge: DockEdge) {
        self.config.dock_edge = edge;
        self.relayout_dock();
        tracing::debug!(%edge, "dock edge changed");
    }

    fn relayout_dock(&mut self) {
        let Some(dock) = self.dock.as_deref_mut() else {
            return;
        };
        dock.relayout(self.config.desktop_rect(), self.config.dock_edge);
        let reserved = dock.reserved_rect();
        self.registry.on_dock_edge_changed(reserved);
    }

    /// Dock and menu layer first, then windows bottom to top, then hover
    /// overlays in the same order.
    pub fn draw(&self, frame: &mut UiFrame<'_>) {
        self.draw_dock(frame);
        if let Some(menu) = self.menu.as_deref() {
            menu.draw(frame);
        }
        let decorator = self.decorator.as_ref();
        for window in self.registry.iter() {
            window.draw(frame, decorator, self.focused == Some(window.id()));
        }
        for window in self.registry.iter() {
            window.draw_highlight_overlay(frame, decorator);
        }
    }

    fn draw_dock(&self, frame: &mut UiFrame<'_>) {
        let Some(dock) = self.dock.as_deref() else {
            return;
        };
        let projection = *frame.projection();
        let rail = projection.project(dock.reserved_rect());
        if rail.width == 0 || rail.height == 0 {
            return;
        }
        frame.render_widget(Clear, rail);
        frame.render_widget(
            Block::default().style(Style::default().bg(crate::theme::dock_bg())),
            rail,
        );
        for id in self.registry.ids() {
            let (Some(icon), Some(window)) = (dock.icon_rect_for(id), self.registry.get(id)) else {
                continue;
            };
            let cell = projection.project(icon);
            if cell.width == 0 || cell.height == 0 {
                continue;
            }
            let style = if window.is_minimized() {
                Style::default()
                    .bg(crate::theme::dock_bg())
                    .fg(crate::theme::dock_icon_minimized_fg())
            } else {
                Style::default()
                    .bg(crate::theme::dock_bg())
                    .fg(crate::theme::dock_icon_fg())
                    .add_modifier(Modifier::BOLD)
            };
            let glyph: String = window.title().chars().take(1).collect();
            frame.set_string(cell.x, cell.y, &glyph, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::RailDock;
    use crate::window::WindowState;
    use crate::window::decorator::ChromeLayout;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect as CellRect;

    fn manager() -> WindowManager {
        let config = WmConfig::default();
        let dock = RailDock::new(config.dock_edge, config.dock_thickness, config.desktop_rect());
        WindowManager::new(config, Some(Box::new(dock)))
    }

    fn settle(wm: &mut WindowManager, at: Point) {
        for _ in 0..60 {
            wm.update(&MouseState::idle(at), 0.05);
        }
    }

    fn click(wm: &mut WindowManager, at: Point) {
        wm.update(&MouseState::pressed(at), 0.016);
        wm.update(&MouseState::released(at), 0.016);
    }

    #[derive(Debug, Default)]
    struct GreedyMenu;

    impl MenuLayer for GreedyMenu {
        fn update(&mut self, mouse: &MouseState, arbiter: &mut FrameInputArbiter) {
            if mouse.left_pressed {
                arbiter.claim_for_menu();
            }
        }
    }

    #[test]
    fn click_focuses_topmost_window_only() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        let b = wm.open("B", WindowOptions::default()).expect("open B");
        settle(&mut wm, Point::new(0.0, 0.0));
        assert_eq!(wm.focused(), Some(b));

        // Only A's exposed corner.
        click(&mut wm, Point::new(110.0, 300.0));
        assert_eq!(wm.focused(), Some(a));
        assert_eq!(wm.registry().order(), &[b, a]);
        assert!(wm.z_rank(a) > wm.z_rank(b));
    }

    #[test]
    fn menu_claim_blocks_windows() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        let b = wm.open("B", WindowOptions::default()).expect("open B");
        settle(&mut wm, Point::new(0.0, 0.0));
        wm.set_menu_layer(Box::new(GreedyMenu));
        click(&mut wm, Point::new(110.0, 300.0));
        assert_eq!(wm.focused(), Some(b));
        assert_eq!(wm.registry().order(), &[a, b]);
    }

    #[test]
    fn close_button_removes_window_and_icon() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        settle(&mut wm, Point::new(0.0, 0.0));
        let close = ChromeLayout::for_bounds(wm.bounds(a).expect("bounds"))
            .close
            .center();
        click(&mut wm, close);
        assert!(wm.is_animating(a));
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(!wm.registry().is_open(a));
        assert!(!wm.is_visible(a));
        assert_eq!(wm.focused(), None);
    }

    #[test]
    fn closing_minimized_window_at_once_drops_its_icon() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(wm.minimize(a));
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(wm.dock().and_then(|d| d.icon_rect_for(a)).is_some());

        wm.close_immediately(a);
        assert!(!wm.registry().is_open(a));
        assert_eq!(wm.window(a).map(Window::state), Some(WindowState::Closed));
        assert!(wm.dock().and_then(|d| d.icon_rect_for(a)).is_none());

        // Reopening starts from a clean slate.
        wm.set_visible(a, true).expect("reopen");
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(wm.is_visible(a));
        assert!(!wm.window(a).is_some_and(Window::is_minimized));
    }

    #[test]
    fn minimize_then_dock_click_restores() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        settle(&mut wm, Point::new(0.0, 0.0));
        let before = wm.bounds(a).expect("bounds");
        assert!(wm.minimize(a));
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(!wm.is_visible(a));
        let icon = wm
            .dock()
            .and_then(|d| d.icon_rect_for(a))
            .expect("icon exists");
        click(&mut wm, icon.center());
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(wm.is_visible(a));
        assert_eq!(wm.bounds(a), Some(before));
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn dock_edge_change_moves_maximized_window() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(wm.toggle_maximize(a));
        wm.set_dock_edge(DockEdge::Bottom);
        assert_eq!(wm.bounds(a), Some(Rect::new(0.0, 30.0, 1920.0, 990.0)));
    }

    #[test]
    fn pin_is_silent() {
        let mut wm = manager();
        let a = wm.open("A", WindowOptions::default()).expect("open A");
        let b = wm.open("B", WindowOptions::default()).expect("open B");
        settle(&mut wm, Point::new(0.0, 0.0));
        assert!(wm.set_pinned(a, true));
        assert_eq!(wm.registry().order(), &[b, a]);
        assert_eq!(wm.focused(), Some(b));
    }

    #[test]
    fn draw_renders_windows_in_order() {
        let mut wm = manager();
        wm.open("Alpha", WindowOptions::default()).expect("open");
        settle(&mut wm, Point::new(0.0, 0.0));
        let area = CellRect::new(0, 0, 192, 54);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf, wm.config().screen);
        wm.draw(&mut frame);
        // (100, 35) projects to column 10, row 1.
        assert_eq!(buf.cell((10, 1)).map(|c| c.symbol()), Some("┌"));
        assert_eq!(buf.cell((11, 2)).map(|c| c.symbol()), Some("A"));
    }
}

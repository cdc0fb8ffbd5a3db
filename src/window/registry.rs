//! Ownership of every registered window plus the render order.
//!
//! `order` is the render order (ascending, last is topmost) of windows that
//! are currently open. Pinned windows always form its suffix, arranged the way
//! `pinned_order` lists them. Closed windows stay registered so they can be
//! reopened under the same id.

use std::collections::BTreeMap;

use thiserror::Error;

use super::decorator::TextMeasure;
use super::{AnimationEvent, DockRef, Window, WindowId, WindowOptions, WindowTuning};
use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, STAGGER_ORIGIN_X, STAGGER_ORIGIN_Y, STAGGER_STEP,
};
use crate::dock::{DockError, WorkArea};
use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("a window titled `{0}` is already registered")]
    DuplicateTitle(String),
    #[error("window {0} is not registered")]
    UnknownWindow(WindowId),
}

#[derive(Debug)]
pub struct WindowRegistry {
    windows: BTreeMap<WindowId, Window>,
    order: Vec<WindowId>,
    pinned_order: Vec<WindowId>,
    next_z: u64,
    next_id: u32,
    work: WorkArea,
    tuning: WindowTuning,
}

impl WindowRegistry {
    pub fn new(work: WorkArea, tuning: WindowTuning) -> Self {
        Self {
            windows: BTreeMap::new(),
            order: Vec::new(),
            pinned_order: Vec::new(),
            next_z: 0,
            next_id: 1,
            work,
            tuning,
        }
    }

    /// Register a window under a unique title. It starts Closed; call
    /// [`Self::reopen`] to show it.
    pub fn register(
        &mut self,
        title: &str,
        options: WindowOptions,
        measure: &dyn TextMeasure,
    ) -> Result<WindowId, RegistryError> {
        if self.find_by_title(title).is_some() {
            return Err(RegistryError::DuplicateTitle(title.to_string()));
        }
        let id = WindowId::from_raw(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        let default_rect = self.stagger_rect(self.windows.len());
        let window = Window::new(
            id,
            title,
            &options,
            measure,
            default_rect,
            self.work,
            self.tuning,
        );
        tracing::debug!(window_id = %id, title = %title, "registered window");
        self.windows.insert(id, window);
        Ok(id)
    }

    /// Default slot for the `index`-th registered window, wrapped back to the
    /// origin once the cascade would leave the screen.
    pub fn stagger_rect(&self, index: usize) -> Rect {
        let screen = self.work.screen;
        let fits = |origin: f32, extent: f32, size: f32| {
            let room = extent - size - origin;
            if room.is_finite() && room >= 0.0 {
                (room / STAGGER_STEP).floor() as usize + 1
            } else {
                1
            }
        };
        let slots = fits(STAGGER_ORIGIN_X, screen.width, DEFAULT_WINDOW_WIDTH)
            .min(fits(STAGGER_ORIGIN_Y, screen.height, DEFAULT_WINDOW_HEIGHT))
            .max(1);
        let n = (index % slots) as f32;
        Rect::new(
            STAGGER_ORIGIN_X + STAGGER_STEP * n,
            STAGGER_ORIGIN_Y + STAGGER_STEP * n,
            DEFAULT_WINDOW_WIDTH,
            DEFAULT_WINDOW_HEIGHT,
        )
    }

    pub fn find_by_title(&self, title: &str) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| w.title() == title)
            .map(Window::id)
    }

    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Every registered id, open or not, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys().copied()
    }

    /// Render order of open windows, bottom to top.
    pub fn order(&self) -> &[WindowId] {
        &self.order
    }

    /// Pinned windows, least recently pinned first.
    pub fn pinned_order(&self) -> &[WindowId] {
        &self.pinned_order
    }

    /// Open windows in render order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Window> + '_ {
        self.order.iter().filter_map(|id| self.windows.get(id))
    }

    pub fn is_open(&self, id: WindowId) -> bool {
        self.order.contains(&id)
    }

    fn restack(&mut self) {
        for id in &self.order {
            if let Some(window) = self.windows.get_mut(id) {
                self.next_z = self.next_z.wrapping_add(1);
                window.set_z_order(self.next_z);
            }
        }
    }

    fn unpinned_end(&self) -> usize {
        self.order
            .iter()
            .position(|id| self.windows.get(id).is_some_and(Window::is_pinned))
            .unwrap_or(self.order.len())
    }

    /// Move `id` to the top of its band: the end of the unpinned prefix, or
    /// the end of the pinned suffix when pinned. Returns `false` when the
    /// window is not open.
    pub fn bring_to_front(&mut self, id: WindowId) -> bool {
        let Some(index) = self.order.iter().position(|x| *x == id) else {
            return false;
        };
        self.order.remove(index);
        let pinned = self.windows.get(&id).is_some_and(Window::is_pinned);
        if pinned {
            self.pinned_order.retain(|x| *x != id);
            self.pinned_order.push(id);
            let windows = &self.windows;
            self.order
                .retain(|x| !windows.get(x).is_some_and(Window::is_pinned));
            self.order.extend(self.pinned_order.iter().copied());
        } else {
            let at = self.unpinned_end();
            self.order.insert(at, id);
        }
        self.restack();
        true
    }

    /// Pin or unpin without changing focus. Pinning jumps the window to the
    /// top of the pinned band; unpinning leaves the render order alone until
    /// the window is next brought to front.
    pub fn set_pinned(&mut self, id: WindowId, pinned: bool) -> bool {
        if !self.is_open(id) {
            return false;
        }
        let Some(window) = self.windows.get_mut(&id) else {
            return false;
        };
        if window.is_pinned() == pinned {
            return true;
        }
        window.set_pinned_flag(pinned);
        if pinned {
            tracing::debug!(window_id = %id, "pinned");
            self.bring_to_front(id);
        } else {
            tracing::debug!(window_id = %id, "unpinned");
            self.pinned_order.retain(|x| *x != id);
        }
        true
    }

    /// Drop `id` from the render and pin orders and from the dock, skipping
    /// any close animation. Idempotent.
    pub fn close(&mut self, id: WindowId, dock: DockRef<'_>) {
        let was_open = self.is_open(id);
        self.order.retain(|x| *x != id);
        self.pinned_order.retain(|x| *x != id);
        if let Some(window) = self.windows.get_mut(&id) {
            window.mark_closed();
        }
        if !was_open {
            return;
        }
        if let Some(dock) = dock
            && let Err(err) = dock.remove_icon(id)
            && !matches!(err, DockError::UnknownIcon(_))
        {
            tracing::warn!(window_id = %id, error = %err, "dock notification failed");
        }
        tracing::debug!(window_id = %id, "removed from z-order");
    }

    /// Show a closed window: unpinned, at the top of the unpinned band, with
    /// its opening animation running. A no-op for a window that is open.
    pub fn reopen(&mut self, id: WindowId) -> Result<(), RegistryError> {
        if self.is_open(id) {
            return Ok(());
        }
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(RegistryError::UnknownWindow(id))?;
        window.open();
        let at = self.unpinned_end();
        self.order.insert(at, id);
        self.restack();
        Ok(())
    }

    /// Highest-ranked visible window whose drawn bounds contain `point`.
    pub fn topmost_under_point(&self, point: Point) -> Option<WindowId> {
        self.order.iter().rev().copied().find(|id| {
            self.windows
                .get(id)
                .is_some_and(|w| w.is_visible() && w.render_bounds().contains(point))
        })
    }

    pub fn is_topmost_under_point(&self, id: WindowId, point: Point) -> bool {
        self.topmost_under_point(point) == Some(id)
    }

    /// Advance every open window's animation. A completed close removes the
    /// window from the z-order here.
    pub fn tick_all(&mut self, dt: f32, mut dock: DockRef<'_>) -> Vec<(WindowId, AnimationEvent)> {
        let mut events = Vec::new();
        for id in self.order.clone() {
            let Some(window) = self.windows.get_mut(&id) else {
                continue;
            };
            if let Some(event) = window.tick_animation(dt, dock.as_deref_mut()) {
                events.push((id, event));
            }
        }
        for (id, event) in &events {
            if *event == AnimationEvent::Closed {
                self.close(*id, dock.as_deref_mut());
            }
        }
        events
    }

    pub fn work_area(&self) -> WorkArea {
        self.work
    }

    pub fn on_screen_resized(&mut self, screen: Size) {
        self.work.screen = screen;
        for window in self.windows.values_mut() {
            window.on_screen_resized(screen);
        }
    }

    pub fn on_dock_edge_changed(&mut self, reserved: Rect) {
        self.work.reserved = reserved;
        for window in self.windows.values_mut() {
            window.on_dock_edge_changed(reserved);
        }
    }
}

//! The docked rail along one screen edge and the avoidance geometry that keeps
//! windows out of it.
//!
//! The window state machine only talks to the rail through [`TaskbarDock`] and
//! treats every call as best-effort: a missing dock or a failed notification
//! is logged and the transition still completes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::DOCK_ICON_PADDING;
use crate::geometry::{Point, Rect, Size, clamp_min_wins};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DockEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl DockEdge {
    pub const ALL: [DockEdge; 4] = [
        DockEdge::Left,
        DockEdge::Bottom,
        DockEdge::Right,
        DockEdge::Top,
    ];

    /// Next edge in clockwise-from-left order; used by the demo's edge cycling.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn is_vertical(self) -> bool {
        matches!(self, DockEdge::Left | DockEdge::Right)
    }
}

impl fmt::Display for DockEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DockEdge::Left => "left",
            DockEdge::Right => "right",
            DockEdge::Top => "top",
            DockEdge::Bottom => "bottom",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DockEdge {
    type Err = DockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(DockEdge::Left),
            "right" => Ok(DockEdge::Right),
            "top" => Ok(DockEdge::Top),
            "bottom" => Ok(DockEdge::Bottom),
            other => Err(DockError::UnknownEdge(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DockError {
    #[error("no dock icon registered for window {0}")]
    UnknownIcon(WindowId),
    #[error("dock is not accepting notifications")]
    Unavailable,
    #[error("unknown dock edge `{0}` (expected left, right, top or bottom)")]
    UnknownEdge(String),
}

/// Call surface the window state machine consumes from the taskbar rail.
pub trait TaskbarDock: fmt::Debug {
    /// Current rectangle the rail occupies.
    fn reserved_rect(&self) -> Rect;
    fn icon_rect_for(&self, id: WindowId) -> Option<Rect>;
    /// Icon whose rectangle contains `point`, for click-to-restore.
    fn icon_at(&self, point: Point) -> Option<WindowId>;
    fn store_pre_minimize(&mut self, id: WindowId, position: Point, size: Size);
    fn fetch_pre_minimize(&self, id: WindowId) -> Option<(Point, Size)>;
    fn notify_minimized(&mut self, id: WindowId, minimized: bool) -> Result<(), DockError>;
    fn ensure_icon_exists(&mut self, id: WindowId);
    fn remove_icon(&mut self, id: WindowId) -> Result<(), DockError>;
    /// Recompute the rail for a new desktop rectangle or edge.
    fn relayout(&mut self, desktop: Rect, edge: DockEdge);
}

/// Icon rail docked to one edge of the desktop.
#[derive(Debug)]
pub struct RailDock {
    edge: DockEdge,
    thickness: f32,
    desktop: Rect,
    icons: Vec<WindowId>,
    minimized: BTreeSet<WindowId>,
    snapshots: BTreeMap<WindowId, (Point, Size)>,
}

impl RailDock {
    pub fn new(edge: DockEdge, thickness: f32, desktop: Rect) -> Self {
        Self {
            edge,
            thickness: thickness.max(0.0),
            desktop,
            icons: Vec::new(),
            minimized: BTreeSet::new(),
            snapshots: BTreeMap::new(),
        }
    }

    pub fn edge(&self) -> DockEdge {
        self.edge
    }

    pub fn icons(&self) -> &[WindowId] {
        &self.icons
    }

    pub fn is_minimized(&self, id: WindowId) -> bool {
        self.minimized.contains(&id)
    }

    fn icon_extent(&self) -> f32 {
        (self.thickness - 2.0 * DOCK_ICON_PADDING).max(1.0)
    }
}

impl TaskbarDock for RailDock {
    fn reserved_rect(&self) -> Rect {
        let d = self.desktop;
        let t = self.thickness.min(if self.edge.is_vertical() {
            d.width
        } else {
            d.height
        });
        match self.edge {
            DockEdge::Left => Rect::new(d.x, d.y, t, d.height),
            DockEdge::Right => Rect::new(d.right() - t, d.y, t, d.height),
            DockEdge::Top => Rect::new(d.x, d.y, d.width, t),
            DockEdge::Bottom => Rect::new(d.x, d.bottom() - t, d.width, t),
        }
    }

    fn icon_rect_for(&self, id: WindowId) -> Option<Rect> {
        let index = self.icons.iter().position(|x| *x == id)?;
        let rail = self.reserved_rect();
        let s = self.icon_extent();
        let step = (s + DOCK_ICON_PADDING) * index as f32;
        let rect = if self.edge.is_vertical() {
            Rect::new(
                rail.x + DOCK_ICON_PADDING,
                rail.y + DOCK_ICON_PADDING + step,
                s,
                s,
            )
        } else {
            Rect::new(
                rail.x + DOCK_ICON_PADDING + step,
                rail.y + DOCK_ICON_PADDING,
                s,
                s,
            )
        };
        Some(rect)
    }

    fn icon_at(&self, point: Point) -> Option<WindowId> {
        self.icons
            .iter()
            .copied()
            .find(|id| self.icon_rect_for(*id).is_some_and(|r| r.contains(point)))
    }

    fn store_pre_minimize(&mut self, id: WindowId, position: Point, size: Size) {
        self.snapshots.insert(id, (position, size));
    }

    fn fetch_pre_minimize(&self, id: WindowId) -> Option<(Point, Size)> {
        self.snapshots.get(&id).copied()
    }

    fn notify_minimized(&mut self, id: WindowId, minimized: bool) -> Result<(), DockError> {
        if !self.icons.contains(&id) {
            return Err(DockError::UnknownIcon(id));
        }
        if minimized {
            self.minimized.insert(id);
        } else {
            self.minimized.remove(&id);
        }
        Ok(())
    }

    fn ensure_icon_exists(&mut self, id: WindowId) {
        if !self.icons.contains(&id) {
            self.icons.push(id);
        }
    }

    fn remove_icon(&mut self, id: WindowId) -> Result<(), DockError> {
        let Some(pos) = self.icons.iter().position(|x| *x == id) else {
            return Err(DockError::UnknownIcon(id));
        };
        self.icons.remove(pos);
        self.minimized.remove(&id);
        self.snapshots.remove(&id);
        Ok(())
    }

    fn relayout(&mut self, desktop: Rect, edge: DockEdge) {
        self.desktop = desktop;
        self.edge = edge;
    }
}

/// Screen, top-bar and rail geometry a window is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkArea {
    pub screen: Size,
    /// Lowest `y` a window's top edge may take (the top bar's bottom).
    pub top: f32,
    /// Rail rectangle; empty when there is no dock.
    pub reserved: Rect,
}

impl WorkArea {
    pub fn new(screen: Size, top: f32, reserved: Rect) -> Self {
        Self {
            screen,
            top,
            reserved,
        }
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen.width, self.screen.height)
    }

    /// Screen below the top bar.
    pub fn desktop(&self) -> Rect {
        let top = self.top.clamp(0.0, self.screen.height.max(0.0));
        Rect::new(0.0, top, self.screen.width, self.screen.height - top)
    }

    /// Desktop minus the rail: the largest of the four strips left over on
    /// each side of the reserved rectangle. This is the maximize target.
    pub fn free_area(&self) -> Rect {
        let desk = self.desktop();
        let rail = self.reserved.intersection(&desk);
        if rail.is_empty() {
            return desk;
        }
        let candidates = [
            Rect::new(desk.x, desk.y, rail.x - desk.x, desk.height),
            Rect::new(rail.right(), desk.y, desk.right() - rail.right(), desk.height),
            Rect::new(desk.x, desk.y, desk.width, rail.y - desk.y),
            Rect::new(desk.x, rail.bottom(), desk.width, desk.bottom() - rail.bottom()),
        ];
        candidates
            .into_iter()
            .filter(|r| !r.is_empty())
            .max_by(|a, b| {
                (a.width * a.height)
                    .partial_cmp(&(b.width * b.height))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(desk)
    }

    /// Clamp a dragged window's origin into the desktop and out of the rail.
    /// Size is never changed while dragging.
    pub fn clamp_drag_position(&self, position: Point, size: Size) -> Point {
        let desk = self.desktop();
        let x = clamp_min_wins(position.x, desk.x, desk.right() - size.width);
        let y = clamp_min_wins(position.y, desk.y, desk.bottom() - size.height);
        let rect = Rect::new(x, y, size.width, size.height);
        if !rect.intersects(&self.reserved) {
            return Point::new(x, y);
        }
        let free = self.free_area();
        Point::new(
            clamp_min_wins(x, free.x, free.right() - size.width),
            clamp_min_wins(y, free.y, free.bottom() - size.height),
        )
    }

    /// Release-time boundary correction: the result lies inside the desktop
    /// and outside the rail. Width and height only shrink (never below `min`)
    /// when moving the window cannot resolve the overflow on its own.
    pub fn correct_bounds(&self, rect: Rect, min: Size) -> Rect {
        let free = self.free_area();
        let mut width = rect.width;
        let mut height = rect.height;
        if width > free.width {
            width = free.width.max(min.width);
        }
        if height > free.height {
            height = free.height.max(min.height);
        }
        let position = self.clamp_drag_position(rect.position(), Size::new(width, height));
        Rect::new(position.x, position.y, width, height)
    }
}

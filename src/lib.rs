//! Floating window manager with animated transitions and a docked icon rail.
//!
//! Geometry is kept in logical pixels and projected onto a terminal through
//! `ratatui` for drawing.

pub mod arbiter;
pub mod config;
pub mod constants;
pub mod dock;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod input;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;

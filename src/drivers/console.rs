use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect as CellRect;

use super::keyboard::KeyboardNormalizer;
use super::{InputDriver, OutputDriver};
use crate::geometry::Size;
use crate::ui::UiFrame;

/// Reads keys, mouse and resize events from the controlling terminal.
#[derive(Debug, Default)]
pub struct ConsoleInputDriver {
    normalizer: KeyboardNormalizer,
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events the window manager has a use for. Focus and paste are dropped.
    fn accept(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
            other => self.normalizer.normalize(other),
        }
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = self.accept(crossterm::event::read()?) {
                return Ok(evt);
            }
        }
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

/// Alternate-screen ratatui terminal the desktop is projected onto.
pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            terminal: Terminal::new(CrosstermBackend::new(io::stdout()))?,
            entered: false,
        })
    }

    /// Terminal size in cells, used to rebuild the projection on resize.
    pub fn area(&self) -> io::Result<CellRect> {
        let size = self.terminal.size()?;
        Ok(CellRect::new(0, 0, size.width, size.height))
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if !self.entered {
            execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
            terminal::enable_raw_mode()?;
            self.terminal.hide_cursor()?;
            self.entered = true;
        }
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if self.entered {
            self.entered = false;
            terminal::disable_raw_mode()?;
            execute!(
                self.terminal.backend_mut(),
                DisableMouseCapture,
                LeaveAlternateScreen
            )?;
            self.terminal.show_cursor()?;
        }
        Ok(())
    }

    fn draw<F>(&mut self, logical: Size, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut UiFrame<'_>),
    {
        self.terminal.draw(|frame| f(&mut UiFrame::new(frame, logical)))?;
        Ok(())
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

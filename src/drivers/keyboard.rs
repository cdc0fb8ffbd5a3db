use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Drops key-release and auto-repeat events so each physical press arrives
/// once on every platform.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(key) if key.kind != KeyEventKind::Press => None,
            other => Some(other),
        }
    }
}

/// Demo keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewWindow,
    /// Activate the n-th registered window, zero-based.
    Activate(usize),
    CycleDockEdge,
    Quit,
}

impl Shortcut {
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')).then_some(Self::Quit);
        }
        match key.code {
            KeyCode::Char('n') => Some(Self::NewWindow),
            KeyCode::Char('e') => Some(Self::CycleDockEdge),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|d| Self::Activate(d as usize - 1)),
            _ => None,
        }
    }
}

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Result;

/// The core's input vocabulary. The terminal layer translates raw key
/// events into these; the session consumes nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Char(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Up,
    Down,
    ToggleCollapse,
    Confirm,
    Cancel,
    Resize,
}

/// Block briefly for the next input event. `None` means the poll
/// timed out or the event carries no meaning for the session.
pub(super) fn next() -> Result<Option<InputEvent>> {
    if !event::poll(Duration::from_millis(100))? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(translate(key)),
        Event::Resize(..) => Ok(Some(InputEvent::Resize)),
        _ => Ok(None),
    }
}

fn translate(key: KeyEvent) -> Option<InputEvent> {
    let event = match key.code {
        KeyCode::Esc => InputEvent::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Cancel,
        KeyCode::Enter => InputEvent::Confirm,
        KeyCode::Tab => InputEvent::ToggleCollapse,
        KeyCode::Up => InputEvent::Up,
        KeyCode::Down => InputEvent::Down,
        KeyCode::Left => InputEvent::CursorLeft,
        KeyCode::Right => InputEvent::CursorRight,
        KeyCode::Home => InputEvent::CursorHome,
        KeyCode::End => InputEvent::CursorEnd,
        KeyCode::Backspace => InputEvent::Backspace,
        KeyCode::Delete => InputEvent::Delete,
        KeyCode::Char(c) => InputEvent::Char(c),
        _ => return None,
    };
    Some(event)
}

use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use std::time::Duration;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    /// Enter: open the selected segment or activate the focused breadcrumb
    Submit,
    /// Backspace: one step back
    Back,
    CursorUp,
    CursorDown,
    FocusLeft,
    FocusRight,
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
///
/// Terminal read errors are logged and reported as "no event".
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Failed to poll terminal events: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(raw) => translate(raw),
        Err(e) => {
            log::warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

/// Map a crossterm event onto a `TuiEvent`, dropping everything the
/// browser doesn't react to.
pub fn translate(raw: Event) -> Option<TuiEvent> {
    match raw {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; act on presses only
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::trace!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(TuiEvent::Quit),
                KeyCode::Enter => Some(TuiEvent::Submit),
                KeyCode::Backspace => Some(TuiEvent::Back),
                KeyCode::Up | KeyCode::Char('k') => Some(TuiEvent::CursorUp),
                KeyCode::Down | KeyCode::Char('j') => Some(TuiEvent::CursorDown),
                KeyCode::Left | KeyCode::Char('h') => Some(TuiEvent::FocusLeft),
                KeyCode::Right | KeyCode::Char('l') => Some(TuiEvent::FocusRight),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::CursorUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::CursorDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

//! Interrupt keys and the interruptible pause used between frames.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What happened while waiting for the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PauseEvents {
    /// A stop key was pressed.
    pub stop: bool,
    /// The terminal was resized.
    pub resized: bool,
}

/// True for keys that close the scene: `q`, `Q`, `Esc` and `Ctrl-C`.
pub fn is_stop_key(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Pump terminal events for up to `timeout`.
///
/// Returns early as soon as a stop key arrives. A zero timeout still drains
/// whatever is already queued.
pub fn pause(timeout: Duration) -> Result<PauseEvents> {
    let deadline = Instant::now() + timeout;
    let mut events = PauseEvents::default();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(events);
        }
        match event::read()? {
            Event::Key(key) if is_stop_key(key) => {
                events.stop = true;
                return Ok(events);
            }
            Event::Resize(_, _) => events.resized = true,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_keys() {
        assert!(is_stop_key(KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_stop_key(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(is_stop_key(KeyEvent::from(KeyCode::Esc)));
        assert!(is_stop_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_stop_key(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_stop_key(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert!(!is_stop_key(key));
    }
}

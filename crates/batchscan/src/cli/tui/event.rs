//! Event handling for the TUI

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Application events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Periodic tick
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    /// Tick rate
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Get next event (blocking with timeout)
    pub async fn next(&self) -> Event {
        let tick_rate = self.tick_rate;

        tokio::task::spawn_blocking(move || {
            if event::poll(tick_rate).unwrap_or(false) {
                event::read().map(translate).unwrap_or(Event::Tick)
            } else {
                Event::Tick
            }
        })
        .await
        .unwrap_or(Event::Tick)
    }
}

/// Map a terminal event to an application event.
///
/// Windows also reports key releases; a scanner's keystrokes would be
/// doubled if those were passed on, so only presses and repeats count.
fn translate(event: CrosstermEvent) -> Event {
    match event {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Event::Key(key),
        CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
        _ => Event::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('7'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_key_release_is_dropped() {
        assert!(matches!(translate(key(KeyEventKind::Release)), Event::Tick));
    }

    #[test]
    fn test_key_press_and_repeat_pass_through() {
        for kind in [KeyEventKind::Press, KeyEventKind::Repeat] {
            match translate(key(kind)) {
                Event::Key(k) => assert_eq!(k.code, KeyCode::Char('7')),
                other => panic!("expected key event, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_resize_and_other_events() {
        assert!(matches!(translate(CrosstermEvent::Resize(80, 24)), Event::Resize(80, 24)));
        assert!(matches!(translate(CrosstermEvent::FocusGained), Event::Tick));
    }
}

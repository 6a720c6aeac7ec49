//! Collects terminal events into one input frame per tick.
//!
//! Press and repeat events both count; releases are ignored, since many
//! terminals never send them. A held key therefore produces at most one
//! command per tick, at the terminal's own repeat rate.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::map::map_key;
use crate::types::{Command, InputFrame};

/// Session-level keys that the engine never sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    Quit,
    Restart,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCollector {
    frame: InputFrame,
    restart: bool,
}

impl FrameCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            self.handle_key(*key);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
            self.restart = true;
            return;
        }

        if let Some(command) = map_key(key) {
            self.frame.push(command);
        }
    }

    /// Quit wins over restart.
    pub fn session_key(&self) -> Option<SessionKey> {
        if self.frame.contains(Command::Quit) {
            Some(SessionKey::Quit)
        } else if self.restart {
            Some(SessionKey::Restart)
        } else {
            None
        }
    }

    /// Hand out the collected frame and start a new one.
    pub fn take_frame(&mut self) -> InputFrame {
        let frame = self.frame;
        self.frame.clear();
        self.restart = false;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_presses_and_repeats_are_collected_once() {
        let mut collector = FrameCollector::new();
        collector.handle_event(&key(KeyCode::Left, KeyEventKind::Press));
        collector.handle_event(&key(KeyCode::Left, KeyEventKind::Repeat));
        collector.handle_event(&key(KeyCode::Char(' '), KeyEventKind::Press));

        let frame = collector.take_frame();
        assert_eq!(frame.len(), 2);
        assert!(frame.contains(Command::MoveLeft));
        assert!(frame.contains(Command::HardDrop));

        assert!(collector.take_frame().is_empty());
    }

    #[test]
    fn test_releases_are_ignored() {
        let mut collector = FrameCollector::new();
        collector.handle_event(&key(KeyCode::Down, KeyEventKind::Release));
        assert!(collector.take_frame().is_empty());
    }

    #[test]
    fn test_session_keys() {
        let mut collector = FrameCollector::new();
        collector.handle_event(&key(KeyCode::Char('r'), KeyEventKind::Press));
        assert_eq!(collector.session_key(), Some(SessionKey::Restart));
        assert!(collector.take_frame().is_empty());
        assert_eq!(collector.session_key(), None);

        collector.handle_event(&key(KeyCode::Char('r'), KeyEventKind::Press));
        collector.handle_event(&key(KeyCode::Char('q'), KeyEventKind::Press));
        assert_eq!(collector.session_key(), Some(SessionKey::Quit));
    }

    #[test]
    fn test_non_key_events_are_ignored() {
        let mut collector = FrameCollector::new();
        collector.handle_event(&Event::Resize(80, 24));
        collector.handle_event(&Event::FocusLost);
        assert!(collector.take_frame().is_empty());
    }
}

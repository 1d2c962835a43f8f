//! Keypress events consumed by the widget state machines.

use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Tab,
    Backspace,
    Delete,
    Char(char),
    /// Ctrl-C while waiting for input.
    Interrupt,
    /// Anything without a binding in any widget.
    Other,
}

impl KeyEvent {
    /// Maps a crossterm key event, or `None` for releases and repeats that
    /// should not count as a keypress.
    pub fn from_crossterm(event: TermKeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }

        let key = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyEvent::Interrupt
            }
            KeyCode::Char(' ') => KeyEvent::Space,
            KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
                log::debug!("Ignoring control chord for `{c}`");
                KeyEvent::Other
            }
            KeyCode::Char(c) => KeyEvent::Char(c),
            KeyCode::Up => KeyEvent::Up,
            KeyCode::Down => KeyEvent::Down,
            KeyCode::Left => KeyEvent::Left,
            KeyCode::Right => KeyEvent::Right,
            KeyCode::Enter => KeyEvent::Enter,
            KeyCode::Tab => KeyEvent::Tab,
            KeyCode::Backspace => KeyEvent::Backspace,
            KeyCode::Delete => KeyEvent::Delete,
            _ => KeyEvent::Other,
        };

        Some(key)
    }

    /// Enter or space.
    pub fn is_confirm(&self) -> bool {
        matches!(self, KeyEvent::Enter | KeyEvent::Space)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        match c {
            '\r' | '\n' => KeyEvent::Enter,
            ' ' => KeyEvent::Space,
            '\t' => KeyEvent::Tab,
            '\x7f' | '\x08' => KeyEvent::Backspace,
            '\x03' => KeyEvent::Interrupt,
            c if c.is_control() => KeyEvent::Other,
            c => KeyEvent::Char(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TermKeyEvent {
        TermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_from_crossterm() {
        assert_eq!(
            KeyEvent::from_crossterm(press(KeyCode::Up, KeyModifiers::NONE)),
            Some(KeyEvent::Up)
        );
        assert_eq!(
            KeyEvent::from_crossterm(press(KeyCode::Char('d'), KeyModifiers::NONE)),
            Some(KeyEvent::Char('d'))
        );
        assert_eq!(
            KeyEvent::from_crossterm(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(KeyEvent::Space)
        );
        assert_eq!(
            KeyEvent::from_crossterm(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyEvent::Interrupt)
        );
        assert_eq!(
            KeyEvent::from_crossterm(press(KeyCode::F(1), KeyModifiers::NONE)),
            Some(KeyEvent::Other)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let mut event = press(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(KeyEvent::from_crossterm(event), None);
    }

    #[test]
    fn test_from_char() {
        assert_eq!(KeyEvent::from('\r'), KeyEvent::Enter);
        assert_eq!(KeyEvent::from('\n'), KeyEvent::Enter);
        assert_eq!(KeyEvent::from(' '), KeyEvent::Space);
        assert_eq!(KeyEvent::from('x'), KeyEvent::Char('x'));
        assert_eq!(KeyEvent::from('\x7f'), KeyEvent::Backspace);
        assert!(KeyEvent::Enter.is_confirm());
        assert!(!KeyEvent::Tab.is_confirm());
    }
}

//! Keyboard input handling
//!
//! Every keypad button has a key; a few keys act on the window itself.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::keypad::ButtonAction;
use crate::core::Operation;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Same as clicking a keypad button
    Press(ButtonAction),
    /// Empty the session tape
    ClearTape,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Some terminals report releases and repeats too
        if kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ClearTape,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => Self::char_action(c),
            KeyCode::Enter => KeyAction::Press(ButtonAction::Equals),
            KeyCode::Esc | KeyCode::Delete => KeyAction::Press(ButtonAction::Clear),
            _ => KeyAction::None,
        }
    }

    fn char_action(c: char) -> KeyAction {
        if let Some(d) = c.to_digit(10) {
            // to_digit(10) is at most 9
            return KeyAction::Press(ButtonAction::Digit(d as u8));
        }
        if let Some(op) = Operation::from_key(c) {
            return KeyAction::Press(ButtonAction::Operator(op));
        }
        match c {
            '.' => KeyAction::Press(ButtonAction::Point),
            '=' => KeyAction::Press(ButtonAction::Equals),
            'c' | 'C' => KeyAction::Press(ButtonAction::Clear),
            's' | 'S' => KeyAction::Press(ButtonAction::Square),
            'r' | 'R' => KeyAction::Press(ButtonAction::SquareRoot),
            'q' | 'Q' => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    fn press(c: char) -> KeyAction {
        InputHandler::new().handle_key(key_event(KeyCode::Char(c)))
    }

    // ===== Entry keys =====

    #[test]
    fn test_handle_digit_keys() {
        for (i, c) in ('0'..='9').enumerate() {
            assert_eq!(press(c), KeyAction::Press(ButtonAction::Digit(i as u8)));
        }
    }

    #[test]
    fn test_handle_decimal_point() {
        assert_eq!(press('.'), KeyAction::Press(ButtonAction::Point));
    }

    #[test]
    fn test_handle_operator_keys() {
        assert_eq!(
            press('+'),
            KeyAction::Press(ButtonAction::Operator(Operation::Add))
        );
        assert_eq!(
            press('-'),
            KeyAction::Press(ButtonAction::Operator(Operation::Subtract))
        );
        assert_eq!(
            press('*'),
            KeyAction::Press(ButtonAction::Operator(Operation::Multiply))
        );
        assert_eq!(
            press('/'),
            KeyAction::Press(ButtonAction::Operator(Operation::Divide))
        );
    }

    #[test]
    fn test_unbound_characters_ignored() {
        for c in ['(', ')', '^', '%', 'x', ' '] {
            assert_eq!(press(c), KeyAction::None, "{c:?} should be ignored");
        }
    }

    // ===== Function keys =====

    #[test]
    fn test_handle_equals_and_enter() {
        let handler = InputHandler::new();
        assert_eq!(press('='), KeyAction::Press(ButtonAction::Equals));
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            KeyAction::Press(ButtonAction::Equals)
        );
    }

    #[test]
    fn test_handle_clear_keys() {
        let handler = InputHandler::new();
        let clear = KeyAction::Press(ButtonAction::Clear);
        assert_eq!(handler.handle_key(key_event(KeyCode::Esc)), clear);
        assert_eq!(handler.handle_key(key_event(KeyCode::Delete)), clear);
        assert_eq!(press('c'), clear);
        assert_eq!(press('C'), clear);
    }

    #[test]
    fn test_handle_square_keys() {
        assert_eq!(press('s'), KeyAction::Press(ButtonAction::Square));
        assert_eq!(press('r'), KeyAction::Press(ButtonAction::SquareRoot));
    }

    #[test]
    fn test_handle_quit() {
        assert_eq!(press('q'), KeyAction::Quit);
    }

    #[test]
    fn test_backspace_ignored() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            KeyAction::None
        );
    }

    // ===== Ctrl key tests =====

    #[test]
    fn test_handle_ctrl_c() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_handle_ctrl_l() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('l'))),
            KeyAction::ClearTape
        );
    }

    #[test]
    fn test_handle_ctrl_digit_ignored() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('5'))),
            KeyAction::None
        );
    }

    // ===== Event kinds =====

    #[test]
    fn test_release_events_ignored() {
        let handler = InputHandler::new();
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('5'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(handler.handle_key(release), KeyAction::None);
    }

    #[test]
    fn test_every_button_reachable_from_keyboard() {
        use super::super::keypad::Keypad;

        let keys: Vec<KeyAction> = "0123456789.+-*/=csr".chars().map(press).collect();
        for btn in Keypad::new().buttons() {
            assert!(
                keys.contains(&KeyAction::Press(btn.action)),
                "no key for {:?}",
                btn.action
            );
        }
    }
}

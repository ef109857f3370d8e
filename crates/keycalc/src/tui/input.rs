//! Keyboard input handling
//!
//! Maps crossterm key events to calculator keys and application actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Key;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed a key to the calculator engine
    Calculator(Key),
    /// Drop every tape entry
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

        // Windows reports releases too
        if kind == KeyEventKind::Release {
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
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char(c) => Key::from_char(c).map_or(KeyAction::None, KeyAction::Calculator),
            KeyCode::Enter => KeyAction::Calculator(Key::Equals),
            KeyCode::Backspace | KeyCode::Delete => KeyAction::Calculator(Key::Backspace),
            KeyCode::Esc => KeyAction::Calculator(Key::Clear),
            _ => KeyAction::None,
        }
    }
}

/// Keyboard help shown in the sidebar
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+ - * /", "Operators"),
    ("Enter =", "Equals"),
    ("%", "Percent"),
    ("n", "Sign"),
    ("Bksp", "Backspace"),
    ("Esc c", "Clear"),
    ("Ctrl+L", "Clear tape"),
    ("q", "Quit"),
];

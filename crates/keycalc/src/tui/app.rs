//! TUI application state

use ratatui::layout::Rect;

use crate::core::history::Tape;
use crate::core::{Engine, Key};

use super::input::KeyAction;
use super::keypad::Keypad;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    engine: Engine,
    keypad: Keypad,
    /// Screen area of the keypad from the last draw, for mouse hit-testing
    keypad_area: Option<Rect>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a calculator app with the default tape size
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Engine::new())
    }

    /// Creates a calculator app keeping at most `tape_size` tape entries
    #[must_use]
    pub fn with_tape_size(tape_size: usize) -> Self {
        Self::with_engine(Engine::with_tape(Tape::with_capacity(tape_size)))
    }

    /// Creates a calculator app around an existing engine
    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            keypad: Keypad::new(),
            keypad_area: None,
            should_quit: false,
        }
    }

    /// The calculator engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The on-screen keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.engine.display()
    }

    /// Operation label
    #[must_use]
    pub fn expression(&self) -> &str {
        self.engine.expression().unwrap_or("")
    }

    /// Status line text
    #[must_use]
    pub fn status(&self) -> &str {
        self.engine.status()
    }

    /// Completed calculations
    #[must_use]
    pub fn tape(&self) -> &Tape {
        self.engine.tape()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Sends a key to the engine and highlights its keypad button
    pub fn press(&mut self, key: Key) {
        self.engine.press(key);
        self.keypad.highlight(key);
    }

    /// Applies a keyboard action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Calculator(key) => self.press(key),
            KeyAction::ClearTape => self.engine.clear_tape(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse click at terminal cell (x, y)
    pub fn click(&mut self, x: u16, y: u16) {
        let Some(area) = self.keypad_area else {
            return;
        };
        if let Some(key) = self.keypad.hit_test(area, x, y) {
            self.press(key);
        }
    }

    /// Records where the keypad was drawn
    pub fn set_keypad_area(&mut self, area: Rect) {
        self.keypad_area = Some(area);
    }
}

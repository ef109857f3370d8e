//! Front-end neutral calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against the bare engine and against the TUI application.

use crate::core::{CalcError, CalcResult, Engine, Key};

/// Abstract driver trait for calculator interactions
pub trait CalculatorDriver {
    /// Presses one key
    fn press(&mut self, key: Key);

    /// Current display text
    fn display(&self) -> String;

    /// Current operation label (empty when none)
    fn expression(&self) -> String;

    /// Resets the calculator to "0"
    fn clear(&mut self);

    /// Tape lines, newest first
    fn tape(&self) -> Vec<String>;

    /// Types a key sequence such as `"12+7="`; whitespace is skipped
    fn press_keys(&mut self, keys: &str) -> CalcResult<()> {
        for c in keys.chars().filter(|c| !c.is_whitespace()) {
            let key = Key::from_char(c).ok_or(CalcError::InvalidKey(c))?;
            self.press(key);
        }
        Ok(())
    }
}

/// Driver over a bare [`Engine`]
#[derive(Debug, Default)]
pub struct EngineDriver {
    engine: Engine,
}

impl EngineDriver {
    /// Creates a driver around a fresh engine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying engine
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, key: Key) {
        self.engine.press(key);
    }

    fn display(&self) -> String {
        self.engine.display().to_string()
    }

    fn expression(&self) -> String {
        self.engine.expression().unwrap_or_default().to_string()
    }

    fn clear(&mut self) {
        self.engine.press(Key::Clear);
    }

    fn tape(&self) -> Vec<String> {
        self.engine.tape().iter_rev().map(|e| e.display()).collect()
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{CalculatorDriver, Key};
    use crate::tui::CalculatorApp;

    /// Driver wrapping the TUI calculator app
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// The underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, key: Key) {
            self.app.press(key);
        }

        fn display(&self) -> String {
            self.app.display().to_string()
        }

        fn expression(&self) -> String {
            self.app.expression().to_string()
        }

        fn clear(&mut self) {
            self.app.press(Key::Clear);
        }

        fn tape(&self) -> Vec<String> {
            self.app.tape().iter_rev().map(|e| e.display()).collect()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared scenario checks =====

/// Presses `keys` and asserts the resulting display
///
/// # Panics
///
/// Panics when a key is invalid or the display differs.
#[allow(clippy::expect_used)]
pub fn expect_display<D: CalculatorDriver>(driver: &mut D, keys: &str, expected: &str) {
    driver.press_keys(keys).expect("valid key sequence");
    assert_eq!(driver.display(), expected, "after keys {keys:?}");
}

/// Basic keypad scenarios
pub fn verify_scenarios<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    expect_display(driver, "5+3=", "8");

    driver.clear();
    expect_display(driver, "10/0=", "Error");

    driver.clear();
    expect_display(driver, "7+2+", "9");
    expect_display(driver, "1=", "10");

    driver.clear();
    expect_display(driver, "0.5", "0.5");

    driver.clear();
    expect_display(driver, "9n", "-9");
    expect_display(driver, "n", "9");

    driver.clear();
    expect_display(driver, "50%", "0.5");
}

/// Recovery after a division by zero
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    expect_display(driver, "8/0=", "Error");
    expect_display(driver, "+", "Error");
    expect_display(driver, "4", "4");
    expect_display(driver, "*2=", "8");
    assert_eq!(driver.expression(), "4 × 2 =");
}

/// Tape contents after a few calculations
#[allow(clippy::expect_used)]
pub fn verify_tape<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("1+1=").expect("valid keys");
    driver.press_keys("c2+2=").expect("valid keys");
    driver.press_keys("c3*3=").expect("valid keys");

    let tape = driver.tape();
    assert!(tape.len() >= 3);
    assert_eq!(tape[0], "3 × 3 = 9");
    assert_eq!(tape[1], "2 + 2 = 4");
}

/// Runs every shared check
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_scenarios(driver);
    verify_error_recovery(driver);
    verify_tape(driver);
}

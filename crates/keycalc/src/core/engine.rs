//! Keypad calculator state machine
//!
//! The engine owns every piece of calculator state, including the display
//! text. Callers feed it [`Key`] events and read back the display, the
//! operation label and a short status line.

use tracing::{debug, warn};

use crate::core::format::{format_number, parse_display, ERROR_DISPLAY};
use crate::core::history::Tape;
use crate::core::{CalcError, CalcResult, Operator};

/// Where the engine is in the digit / operator / equals protocol
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// No operator pending; digits extend the display
    Idle,
    /// Operator chosen; the next digit starts the right-hand operand
    OperatorPending {
        /// Left-hand operand
        left: f64,
        /// Operator awaiting its right-hand operand
        op: Operator,
    },
    /// Operator chosen and the right-hand operand is being typed
    OperandEntered {
        /// Left-hand operand
        left: f64,
        /// Operator awaiting the right-hand operand
        op: Operator,
    },
    /// A result is shown; the next digit starts a fresh number
    ResultShown,
    /// The last calculation failed; the display shows the error marker
    Error,
}

impl Phase {
    /// Returns the pending operator with its left-hand operand
    #[must_use]
    pub const fn pending(&self) -> Option<(f64, Operator)> {
        match *self {
            Self::OperatorPending { left, op } | Self::OperandEntered { left, op } => {
                Some((left, op))
            }
            Self::Idle | Self::ResultShown | Self::Error => None,
        }
    }

    /// Returns true when the next digit replaces the display instead of extending it
    #[must_use]
    pub const fn awaiting_new_operand(&self) -> bool {
        matches!(self, Self::OperatorPending { .. } | Self::ResultShown)
    }
}

/// A single keypad or keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    Decimal,
    /// Binary operator
    Operator(Operator),
    /// Equals
    Equals,
    /// Clear everything
    Clear,
    /// Remove the last character
    Backspace,
    /// Divide the display by one hundred
    Percent,
    /// Flip the sign of the display
    PlusMinus,
}

impl Key {
    /// Maps a typed character to a key.
    ///
    /// Digits, `.` or `,`, `+ - * x /`, `=`, `%`, `n` (sign), `c` (clear) and
    /// `b` (backspace) are understood, along with the keypad glyphs.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            return Some(Self::Digit(d as u8));
        }
        if let Some(op) = Operator::from_char(c) {
            return Some(Self::Operator(op));
        }
        match c {
            '.' | ',' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            '%' => Some(Self::Percent),
            'n' | 'N' | '_' | '±' => Some(Self::PlusMinus),
            'c' | 'C' => Some(Self::Clear),
            'b' | 'B' | '⌫' => Some(Self::Backspace),
            _ => None,
        }
    }

    /// Returns the label printed on the keypad button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::Clear => "C".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Percent => "%".to_string(),
            Self::PlusMinus => "±".to_string(),
        }
    }

    /// Returns the status line text describing this key press
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Digit(d) => format!("Digit {d}"),
            Self::Decimal => "Decimal point".to_string(),
            Self::Operator(op) => format!("Operator {op}"),
            Self::Equals => "Calculated".to_string(),
            Self::Clear => "Cleared".to_string(),
            Self::Backspace => "Backspace".to_string(),
            Self::Percent => "Percent".to_string(),
            Self::PlusMinus => "Sign toggled".to_string(),
        }
    }
}

/// Keypad calculator engine
#[derive(Debug, Clone)]
pub struct Engine {
    display: String,
    phase: Phase,
    /// Operation label, e.g. "12 +" or "12 + 7 ="
    expression: Option<String>,
    status: String,
    tape: Tape,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine showing "0" with nothing pending
    #[must_use]
    pub fn new() -> Self {
        Self::with_tape(Tape::new())
    }

    /// Creates an engine recording completed calculations into `tape`
    #[must_use]
    pub fn with_tape(tape: Tape) -> Self {
        Self {
            display: "0".to_string(),
            phase: Phase::Idle,
            expression: None,
            status: String::new(),
            tape,
        }
    }

    /// Current display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Current protocol phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Operation label for the status collaborator
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref()
    }

    /// Description of the last key press
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Completed calculations
    #[must_use]
    pub const fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Drops all recorded calculations
    pub fn clear_tape(&mut self) {
        self.tape.clear();
    }

    /// Returns true while the error marker is displayed
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.phase, Phase::Error)
    }

    /// Handles one key event and returns the new display
    pub fn press(&mut self, key: Key) -> &str {
        match key {
            Key::Digit(d) => {
                self.input_digit(d);
            }
            Key::Decimal => {
                self.input_decimal();
            }
            Key::Operator(op) => {
                self.input_operator(op);
            }
            Key::Equals => {
                self.calculate_equal();
            }
            Key::Clear => self.clear(),
            Key::Backspace => {
                self.backspace();
            }
            Key::Percent => {
                self.percent();
            }
            Key::PlusMinus => {
                self.plus_minus();
            }
        }

        if !self.is_error() {
            self.status = key.describe();
        }
        debug!(?key, display = %self.display, phase = ?self.phase, "key handled");
        &self.display
    }

    /// Handles a sequence of keys and returns the final display
    pub fn press_all<I>(&mut self, keys: I) -> &str
    where
        I: IntoIterator<Item = Key>,
    {
        for key in keys {
            self.press(key);
        }
        &self.display
    }

    /// Enters a digit (0-9)
    pub fn input_digit(&mut self, digit: u8) -> &str {
        match char::from_digit(u32::from(digit), 10) {
            Some(c) => self.enter(c),
            None => {
                warn!(digit, "ignoring out-of-range digit");
                &self.display
            }
        }
    }

    /// Enters the decimal point
    pub fn input_decimal(&mut self) -> &str {
        self.enter('.')
    }

    fn enter(&mut self, c: char) -> &str {
        if self.is_error() {
            self.clear();
        }

        if self.phase.awaiting_new_operand() {
            self.display = if c == '.' {
                "0.".to_string()
            } else {
                c.to_string()
            };
            self.phase = match self.phase {
                Phase::OperatorPending { left, op } => Phase::OperandEntered { left, op },
                _ => {
                    self.expression = None;
                    Phase::Idle
                }
            };
        } else if self.display == "0" && c != '.' {
            self.display = c.to_string();
        } else if c == '.' && self.display.contains('.') {
            // at most one decimal point
        } else {
            self.display.push(c);
        }

        &self.display
    }

    /// Selects a binary operator.
    ///
    /// With a right-hand operand already typed, the pending operation is
    /// applied first and its result becomes the new left-hand operand.
    pub fn input_operator(&mut self, op: Operator) -> &str {
        if self.is_error() {
            return &self.display;
        }
        let value = match self.value() {
            Ok(value) => value,
            Err(e) => return self.fail(e),
        };

        match self.phase {
            Phase::Error => return &self.display,
            Phase::OperandEntered { left, op: pending } => {
                self.expression = Some(format!(
                    "{} {pending} {}",
                    format_number(left),
                    format_number(value)
                ));
                match pending.apply(left, value) {
                    Ok(result) => {
                        self.display = format_number(result);
                        self.phase = Phase::OperatorPending { left: result, op };
                    }
                    Err(e) => return self.fail(e),
                }
            }
            Phase::Idle | Phase::OperatorPending { .. } | Phase::ResultShown => {
                self.display = format_number(value);
                self.phase = Phase::OperatorPending { left: value, op };
            }
        }

        self.expression = Some(format!("{} {op}", self.display));
        &self.display
    }

    /// Applies the pending operator to the displayed operand
    pub fn calculate_equal(&mut self) -> &str {
        let Some((left, op)) = self.phase.pending() else {
            return &self.display;
        };

        let right = match self.value() {
            Ok(right) => right,
            Err(e) => return self.fail(e),
        };
        let expression = format!("{} {op} {}", format_number(left), format_number(right));
        self.expression = Some(format!("{expression} ="));

        match op.apply(left, right) {
            Ok(result) => {
                self.display = format_number(result);
                self.phase = Phase::ResultShown;
                self.tape.record(&expression, result);
                &self.display
            }
            Err(e) => self.fail(e),
        }
    }

    /// Removes the last character of the display
    pub fn backspace(&mut self) -> &str {
        if self.is_error() {
            self.clear();
            return &self.display;
        }

        if self.display.chars().count() <= 1 {
            self.display = "0".to_string();
            return &self.display;
        }

        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
        &self.display
    }

    /// Divides the displayed value by one hundred
    pub fn percent(&mut self) -> &str {
        if self.is_error() {
            return &self.display;
        }
        match self.value() {
            Ok(value) => {
                self.display = format_number(value / 100.0);
                &self.display
            }
            Err(e) => self.fail(e),
        }
    }

    /// Flips the sign of the displayed value
    pub fn plus_minus(&mut self) -> &str {
        if self.is_error() || self.display == "0" {
            return &self.display;
        }
        match self.value() {
            Ok(value) => {
                self.display = format_number(-value);
                &self.display
            }
            Err(e) => self.fail(e),
        }
    }

    /// Resets the engine to "0" with nothing pending.
    ///
    /// The tape is kept.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.phase = Phase::Idle;
        self.expression = None;
    }

    /// Displayed operand; a typed numeral too long for `f64` is an overflow
    fn value(&self) -> CalcResult<f64> {
        let value = parse_display(&self.display);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::Overflow)
        }
    }

    fn fail(&mut self, error: CalcError) -> &str {
        warn!(%error, expression = ?self.expression, "calculation failed");
        self.display = ERROR_DISPLAY.to_string();
        self.phase = Phase::Error;
        self.status = error.to_string();
        &self.display
    }
}

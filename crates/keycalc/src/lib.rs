//! keycalc - keypad calculator engine with a terminal front end
//!
//! The [`core::Engine`] owns all calculator state. It takes one key at a time
//! (digit, operator, equals, clear, backspace, percent, sign flip) and hands
//! back the text for a single-line display, an operation label such as
//! `"12 + 7 ="` and a short status line.
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.press(Key::Digit(5));
//! engine.press(Key::Operator(Operator::Add));
//! engine.press(Key::Digit(3));
//! assert_eq!(engine.press(Key::Equals), "8");
//! assert_eq!(engine.expression(), Some("5 + 3 ="));
//!
//! // Division by zero shows the error marker instead of failing
//! engine.press(Key::Operator(Operator::Divide));
//! engine.press(Key::Digit(0));
//! assert_eq!(engine.press(Key::Equals), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{Tape, TapeEntry};
    pub use crate::core::{
        format_number, CalcError, CalcResult, Engine, Key, Operator, Phase, ERROR_DISPLAY,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

//! Calculator core: keypad state machine, operators, formatting and tape
//!
//! Arithmetic failures are values of [`CalcError`]; the engine turns them into
//! its error phase instead of leaking NaN into later arithmetic.

pub mod engine;
pub mod format;
pub mod history;
mod operations;

pub use engine::{Engine, Key, Phase};
pub use format::{format_number, parse_display, ERROR_DISPLAY};
pub use operations::Operator;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result is not a finite number
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Character that does not map to any calculator key
    #[error("Invalid key: {0:?}")]
    InvalidKey(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display_division_by_zero() {
        let err = CalcError::DivisionByZero;
        assert_eq!(format!("{err}"), "Division by zero");
    }

    #[test]
    fn test_calc_error_display_overflow() {
        let err = CalcError::Overflow;
        assert_eq!(format!("{err}"), "Overflow: result exceeds maximum value");
    }

    #[test]
    fn test_calc_error_display_invalid_key() {
        let err = CalcError::InvalidKey('z');
        assert_eq!(format!("{err}"), "Invalid key: 'z'");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }
}

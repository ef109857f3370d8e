//! Binary operators of the keypad calculator

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Operator waiting for (or applied to) a right-hand operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order (bottom to top of the operator column)
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol shown on the keypad and in the operation label
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Maps a typed character to an operator.
    ///
    /// Accepts the keypad glyphs as well as their ASCII stand-ins.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | 'x' | 'X' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operator to `left` and `right`
    pub fn apply(self, left: f64, right: f64) -> CalcResult<f64> {
        let result = match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => {
                if right == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                left / right
            }
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_operator_symbols() {
        assert_eq!(Operator::Add.symbol(), "+");
        assert_eq!(Operator::Subtract.symbol(), "-");
        assert_eq!(Operator::Multiply.symbol(), "×");
        assert_eq!(Operator::Divide.symbol(), "÷");
    }

    #[test]
    fn test_operator_display_matches_symbol() {
        for op in Operator::ALL {
            assert_eq!(op.to_string(), op.symbol());
        }
    }

    #[test]
    fn test_from_char_ascii_and_glyphs() {
        assert_eq!(Operator::from_char('+'), Some(Operator::Add));
        assert_eq!(Operator::from_char('-'), Some(Operator::Subtract));
        assert_eq!(Operator::from_char('*'), Some(Operator::Multiply));
        assert_eq!(Operator::from_char('x'), Some(Operator::Multiply));
        assert_eq!(Operator::from_char('×'), Some(Operator::Multiply));
        assert_eq!(Operator::from_char('/'), Some(Operator::Divide));
        assert_eq!(Operator::from_char('÷'), Some(Operator::Divide));
        assert_eq!(Operator::from_char('%'), None);
        assert_eq!(Operator::from_char('^'), None);
    }

    #[test]
    fn test_symbol_round_trips_through_from_char() {
        for op in Operator::ALL {
            let c = op.symbol().chars().next().unwrap();
            assert_eq!(Operator::from_char(c), Some(op));
        }
    }

    #[test]
    fn test_apply_add() {
        assert_eq!(Operator::Add.apply(5.0, 3.0), Ok(8.0));
        assert_eq!(Operator::Add.apply(-2.0, -3.0), Ok(-5.0));
    }

    #[test]
    fn test_apply_subtract() {
        assert_eq!(Operator::Subtract.apply(3.0, 5.0), Ok(-2.0));
    }

    #[test]
    fn test_apply_multiply() {
        assert_eq!(Operator::Multiply.apply(-2.0, 3.0), Ok(-6.0));
        assert_eq!(Operator::Multiply.apply(5.0, 0.0), Ok(0.0));
    }

    #[test]
    fn test_apply_divide() {
        assert_eq!(Operator::Divide.apply(6.0, 2.0), Ok(3.0));
        assert_eq!(Operator::Divide.apply(1.0, 4.0), Ok(0.25));
    }

    #[test]
    fn test_apply_divide_by_zero() {
        assert_eq!(
            Operator::Divide.apply(10.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(0.0, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(10.0, -0.0),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_apply_overflow() {
        assert_eq!(
            Operator::Multiply.apply(f64::MAX, 10.0),
            Err(CalcError::Overflow)
        );
        assert_eq!(Operator::Add.apply(f64::MAX, f64::MAX), Err(CalcError::Overflow));
    }

    proptest! {
        #[test]
        fn prop_divide_by_zero_always_errors(a in -1e12f64..1e12f64) {
            prop_assert_eq!(Operator::Divide.apply(a, 0.0), Err(CalcError::DivisionByZero));
        }

        #[test]
        fn prop_add_commutative(a in -1e10f64..1e10f64, b in -1e10f64..1e10f64) {
            prop_assert_eq!(Operator::Add.apply(a, b), Operator::Add.apply(b, a));
        }

        #[test]
        fn prop_multiply_identity(a in -1e10f64..1e10f64) {
            prop_assert_eq!(Operator::Multiply.apply(a, 1.0), Ok(a));
        }
    }
}

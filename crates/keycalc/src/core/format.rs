//! Numeral formatting policy for the calculator display

/// Display text shown after a failed calculation
pub const ERROR_DISPLAY: &str = "Error";

/// Fractional digits kept for non-integral results
const FRACTION_DIGITS: usize = 10;

/// Formats a value for the single-line display.
///
/// Integral values render without a fractional part. Other values keep at
/// most ten fractional digits, without trailing zeros.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_DISPLAY.to_string();
    }

    // -0.0 == 0.0, this drops the sign
    let value = if value == 0.0 { 0.0 } else { value };

    if value == value.floor() {
        return format!("{value:.0}");
    }

    let fixed = format!("{value:.prec$}", prec = FRACTION_DIGITS);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Parses display text back into a value.
///
/// Text that is not a numeral (the error marker) reads as zero.
#[must_use]
pub fn parse_display(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}

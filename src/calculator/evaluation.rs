//! Expression evaluation and result formatting.
//!
//! Wraps normalization and the arithmetic parser behind a single call,
//! rounds results to suppress binary floating-point noise, and formats
//! values for the display and for the expression buffer.

use serde::Serialize;
use tracing::debug;

use super::error::EvalError;
use super::normalize::normalize;
use super::parser::parse_and_eval;

/// Results are rounded to at most this many decimal places.
const MAX_DECIMAL_PLACES: i32 = 12;

/// An f64 holds about this many reliable decimal digits; digits beyond it
/// are representation noise.
const SIGNIFICANT_DIGITS: i32 = 15;

/// A successful evaluation of the expression buffer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    /// The text as typed.
    pub expression: String,
    /// The text after normalization.
    pub normalized: String,
    /// The rounded numeric value.
    pub value: f64,
}

impl Evaluation {
    /// Formatted for clipboard and for continuing input (raw number).
    pub fn clipboard(&self) -> String {
        format_value(self.value)
    }
}

/// Evaluate an expression to a rounded number.
///
/// Empty input, or input that normalizes to nothing, evaluates to `0`.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    evaluate_expression(input).map(|evaluation| evaluation.value)
}

/// Evaluate an expression, keeping the intermediate normalized text.
pub fn evaluate_expression(input: &str) -> Result<Evaluation, EvalError> {
    let normalized = normalize(input)?;

    let value = if normalized.is_empty() {
        0.0
    } else {
        round_result(parse_and_eval(&normalized)?)
    };

    debug!(%normalized, value, "evaluated expression");
    Ok(Evaluation {
        expression: input.to_string(),
        normalized,
        value,
    })
}

/// Round to twelve decimal places, half away from zero.
///
/// Once the integer part has more than three digits, fewer decimals are
/// kept so the result never exceeds fifteen significant digits: the scaled
/// value then always stays below 2^53, where `round` is exact.
/// Negative zero is returned as positive zero.
pub fn round_result(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let decimals = (SIGNIFICANT_DIGITS - integer_digits(value)).clamp(0, MAX_DECIMAL_PLACES);
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Digits before the decimal point, counting a leading `0` as one and
/// saturating at `SIGNIFICANT_DIGITS`.
fn integer_digits(value: f64) -> i32 {
    let magnitude = value.abs();
    let mut digits = 1;
    let mut bound = 10.0;
    while magnitude >= bound && digits < SIGNIFICANT_DIGITS {
        digits += 1;
        bound *= 10.0;
    }
    digits
}

/// Format a number as plain decimal text that the parser accepts back.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Also covers -0.
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Format a number for display with thousand separators.
pub fn format_display(value: f64) -> String {
    let raw = format_value(value);
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };

    match unsigned.split_once('.') {
        Some((int_part, frac_part)) => {
            format!("{}{}.{}", sign, format_with_separators(int_part), frac_part)
        }
        None => format!("{}{}", sign, format_with_separators(unsigned)),
    }
}

/// Insert a comma every three digits of an unsigned integer string.
fn format_with_separators(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::MathError;

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(14.0));
        assert_eq!(evaluate("(2 + 3) * 4"), Ok(20.0));
    }

    #[test]
    fn test_display_glyphs() {
        assert_eq!(evaluate("6 × 7"), Ok(42.0));
        assert_eq!(evaluate("9 ÷ 4"), Ok(2.25));
    }

    #[test]
    fn test_percent() {
        assert_eq!(evaluate("5%"), Ok(0.05));
        assert_eq!(evaluate("50% × 8"), Ok(4.0));
    }

    #[test]
    fn test_rounding_hides_float_noise() {
        assert_eq!(evaluate("0.1 + 0.2"), Ok(0.3));
        assert_eq!(format_value(evaluate("0.1 + 0.2").unwrap()), "0.3");
        assert_eq!(evaluate("1 / 3"), Ok(0.333333333333));
        assert_eq!(evaluate("-0.1 - 0.2"), Ok(-0.3));
    }

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(2.0 / 3.0), 0.666666666667);
        assert_eq!(round_result(-2.0 / 3.0), -0.666666666667);
        assert_eq!(round_result(-1e-13), 0.0);
        assert!(round_result(-1e-13).is_sign_positive());
        assert_eq!(round_result(1e300), 1e300);
    }

    #[test]
    fn test_rounding_large_magnitudes() {
        assert_eq!(format_value(evaluate("10000.1 + 10000.2").unwrap()), "20000.3");
        assert_eq!(format_value(evaluate("100000.7 - 0.1").unwrap()), "100000.6");
        assert_eq!(format_value(evaluate("9999.1 + 0.2").unwrap()), "9999.3");
        assert_eq!(format_value(evaluate("-10000.1 - 10000.2").unwrap()), "-20000.3");
        assert_eq!(evaluate("1234.567890123"), Ok(1234.567890123));
        assert_eq!(evaluate("123456789 * 1000"), Ok(123456789000.0));
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(integer_digits(0.5), 1);
        assert_eq!(integer_digits(9.99), 1);
        assert_eq!(integer_digits(10.0), 2);
        assert_eq!(integer_digits(-20000.3), 5);
        assert_eq!(integer_digits(1e300), SIGNIFICANT_DIGITS);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(evaluate(""), Ok(0.0));
        assert_eq!(evaluate("abc"), Ok(0.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("10 / 0"), Err(MathError::DivisionByZero.into()));
        assert!(evaluate("2 +").unwrap_err().is_parse());
        assert!(evaluate("(1 + 2").unwrap_err().is_parse());
    }

    #[test]
    fn test_evaluation_keeps_normalized_text() {
        let evaluation = evaluate_expression("1 000 × 2%").unwrap();
        assert_eq!(evaluation.normalized, "1000*(2/100)");
        assert_eq!(evaluation.value, 20.0);
        assert_eq!(evaluation.clipboard(), "20");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(0.0000001), "0.0000001");
        assert_eq!(format_value(-2.5), "-2.5");
        assert_eq!(format_value(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_thousand_separators() {
        assert_eq!(format_display(1_000_000.0), "1,000,000");
        assert_eq!(format_display(-1234.5), "-1,234.5");
        assert_eq!(format_display(999.0), "999");
        assert_eq!(format_display(0.25), "0.25");
    }

    #[test]
    fn test_formatted_value_round_trips() {
        for value in [0.3, -12.75, 1e-7, 123456789.0] {
            assert_eq!(evaluate(&format_value(value)), Ok(round_result(value)));
        }
    }
}

//! Operations applied to the current value or text of the expression.

use super::error::{EvalError, MathError};
use super::evaluation::round_result;

/// A transform that replaces the expression with a computed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivedOp {
    Square,
    SquareRoot,
    Reciprocal,
}

impl DerivedOp {
    /// Apply the transform to an evaluated value.
    pub fn apply(self, value: f64) -> Result<f64, EvalError> {
        match self {
            Self::Square => square(value),
            Self::SquareRoot => square_root(value),
            Self::Reciprocal => reciprocal(value),
        }
    }

    /// History label for the transform applied to `expression`.
    pub fn label(self, expression: &str) -> String {
        match self {
            Self::Square => format!("sqr({})", expression),
            Self::SquareRoot => format!("√({})", expression),
            Self::Reciprocal => format!("1/({})", expression),
        }
    }
}

pub fn square(value: f64) -> Result<f64, EvalError> {
    finite_rounded(value * value)
}

pub fn square_root(value: f64) -> Result<f64, EvalError> {
    if value < 0.0 {
        return Err(MathError::NegativeSquareRoot.into());
    }
    finite_rounded(value.sqrt())
}

pub fn reciprocal(value: f64) -> Result<f64, EvalError> {
    if value == 0.0 {
        return Err(MathError::ReciprocalOfZero.into());
    }
    finite_rounded(1.0 / value)
}

fn finite_rounded(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(round_result(value))
    } else {
        Err(MathError::NonFinite.into())
    }
}

/// Negate the trailing numeric literal of `expression`, as text.
///
/// A `-` directly before the literal counts as its sign only when it is not
/// a binary minus (it follows the start of input, an operator, or `(`).
/// Input that does not end in a literal is returned unchanged.
pub fn toggle_sign(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let end = chars.len();

    let mut start = trailing_digits(&chars, end);
    if start == end {
        return expression.to_string();
    }
    if start > 0 && chars[start - 1] == '.' {
        start = trailing_digits(&chars, start - 1);
    }

    let literal: String = chars[start..].iter().collect();
    if start > 0 && chars[start - 1] == '-' && is_sign_position(&chars[..start - 1]) {
        let head: String = chars[..start - 1].iter().collect();
        format!("{}{}", head, literal)
    } else {
        let head: String = chars[..start].iter().collect();
        format!("{}-{}", head, literal)
    }
}

fn trailing_digits(chars: &[char], end: usize) -> usize {
    let mut i = end;
    while i > 0 && chars[i - 1].is_ascii_digit() {
        i -= 1;
    }
    i
}

fn is_sign_position(before: &[char]) -> bool {
    match before.iter().rev().find(|c| !c.is_whitespace()) {
        None => true,
        Some(c) => matches!(c, '+' | '-' | '*' | '/' | '×' | '÷' | '('),
    }
}

//! Error types returned by the expression evaluator.

use thiserror::Error;

/// Numeric failures raised while evaluating or transforming a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
    #[error("square root of a negative number")]
    NegativeSquareRoot,
    #[error("reciprocal of zero")]
    ReciprocalOfZero,
}

/// Failure of `normalize` or `evaluate`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Malformed syntax: mismatched parentheses, missing operand, trailing operator.
    #[error("parse error: {0}")]
    Parse(String),
    #[error("math error: {0}")]
    Math(#[from] MathError),
    /// Normalized text contained a character outside the arithmetic allow-list.
    #[error("forbidden token: {0}")]
    ForbiddenToken(String),
}

impl EvalError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Check if this is a syntax failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

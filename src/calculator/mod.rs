//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Normalize typed input (`×`, `÷`, postfix `%`) into strict arithmetic
//! - Evaluate it with a closed-grammar parser and round the result
//! - Apply derived operations (square, square root, reciprocal, sign toggle)
//! - Copy results to the clipboard
//!
//! Nothing here holds state; every call re-parses its input.

mod clipboard;
mod derived;
mod error;
mod evaluation;
mod normalize;
mod parser;

pub use clipboard::copy_to_clipboard;
pub use derived::{DerivedOp, reciprocal, square, square_root, toggle_sign};
pub use error::{EvalError, MathError};
pub use evaluation::{
    Evaluation, evaluate, evaluate_expression, format_display, format_value, round_result,
};
pub use normalize::{is_allowed_char, normalize};

//! Normalization of typed input into strict arithmetic syntax.
//!
//! Display glyphs are rewritten to ASCII operators, postfix percent is
//! expanded, and everything outside the arithmetic allow-list is dropped.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::error::EvalError;

lazy_static! {
    /// A decimal literal immediately followed by `%`.
    static ref PERCENT_LITERAL: Regex = Regex::new(r"(\d+(?:\.\d+)?)%").unwrap();

    /// Any character that may not reach the parser.
    static ref DISALLOWED_CHARS: Regex = Regex::new(r"[^0-9.+\-*/(),]").unwrap();
}

/// Check whether a character belongs to the normalized alphabet.
pub fn is_allowed_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | '*' | '/' | '(' | ')' | ',')
}

/// Normalize an expression for evaluation.
///
/// 1. `×` and `÷` become `*` and `/`.
/// 2. `<number>%` becomes `(<number>/100)`.
/// 3. Every character outside `[0-9.+\-*/(),]` is removed.
///
/// The output is a fixed point: normalizing it again returns it unchanged.
pub fn normalize(input: &str) -> Result<String, EvalError> {
    let glyphs = input.replace('×', "*").replace('÷', "/");
    let percent = PERCENT_LITERAL.replace_all(&glyphs, "($1/100)");
    let stripped = DISALLOWED_CHARS.replace_all(&percent, "").into_owned();

    if let Some(bad) = stripped.chars().find(|&c| !is_allowed_char(c)) {
        return Err(EvalError::ForbiddenToken(bad.to_string()));
    }

    debug!(input, normalized = %stripped, "normalized expression");
    Ok(stripped)
}

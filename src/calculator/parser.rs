//! Recursive-descent parser for normalized arithmetic.
//!
//! Grammar (conventional precedence, left associative):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := number | '(' expr ')'
//! number  := digits ['.' [digits]] | '.' digits
//! ```
//!
//! Values are computed while parsing; no tree is kept.

use super::error::{EvalError, MathError};

/// Parentheses and unary signs deeper than this are rejected.
const MAX_DEPTH: usize = 256;

/// Parse and evaluate a normalized, non-empty expression.
pub fn parse_and_eval(source: &str) -> Result<f64, EvalError> {
    let mut parser = Parser::new(source);
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(')') => Err(EvalError::parse(format!(
            "unmatched ')' at position {}",
            parser.pos
        ))),
        Some(c) => Err(EvalError::parse(format!(
            "unexpected '{}' at position {}",
            c, parser.pos
        ))),
    }
}

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            depth: 0,
            source,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            acc = if op == '+' { acc + rhs } else { acc - rhs };
            finite(acc)?;
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.unary()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            acc = if op == '*' {
                acc * rhs
            } else {
                if rhs == 0.0 {
                    return Err(MathError::DivisionByZero.into());
                }
                acc / rhs
            };
            finite(acc)?;
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(sign @ ('-' | '+')) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(if sign == '-' { -value } else { value })
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some('(') => {
                let open = self.pos;
                self.pos += 1;
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                if self.bump() != Some(')') {
                    return Err(EvalError::parse(format!(
                        "unclosed '(' at position {open}"
                    )));
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(EvalError::parse(format!(
                "expected a number but found '{}' at position {}",
                c, self.pos
            ))),
            None => Err(EvalError::parse("expected a number at end of input")),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        let int_digits = self.digits();
        let mut frac_digits = 0;
        if self.peek() == Some('.') {
            self.pos += 1;
            frac_digits = self.digits();
        }
        if int_digits == 0 && frac_digits == 0 {
            return Err(EvalError::parse(format!(
                "lone '.' at position {start}"
            )));
        }
        if self.peek() == Some('.') {
            return Err(EvalError::parse(format!(
                "second decimal point at position {}",
                self.pos
            )));
        }

        let literal: String = self.chars[start..self.pos].iter().collect();
        let value: f64 = literal.parse().map_err(|_| {
            EvalError::parse(format!("invalid number '{}' in '{}'", literal, self.source))
        })?;
        finite(value)?;
        Ok(value)
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::parse("expression nested too deeply"));
        }
        Ok(())
    }
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::NonFinite.into())
    }
}

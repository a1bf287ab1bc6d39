//! A keyboard-driven arithmetic calculator.
//!
//! The [`calculator`] module is a stateless evaluator over a closed
//! arithmetic grammar. [`state::CalculatorState`] holds the expression
//! buffer, memory register and history, and the [`ui`] module renders it
//! to a terminal.

pub mod calculator;
pub mod config;
pub mod items;
pub mod state;
pub mod ui;

pub use calculator::{EvalError, MathError, evaluate, normalize};
pub use state::{Action, CalculatorState};

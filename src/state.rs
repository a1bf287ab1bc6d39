//! Application state and the actions that mutate it.
//!
//! The evaluator is stateless; everything that survives between key presses
//! lives in [`CalculatorState`]. Each [`Action`] runs to completion and
//! leaves the display consistent with the expression buffer.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::calculator::{
    DerivedOp, EvalError, evaluate, format_display, format_value, round_result, toggle_sign,
};
use crate::config::Config;
use crate::items::{HistoryItem, HistoryLog};
use crate::ui::ThemeKind;

/// Binary operator buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The glyph inserted into the expression buffer.
    pub fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }
}

/// A discrete user action.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Append raw text (digits, operators, parentheses typed directly).
    Insert(String),
    /// Append `.` after a digit, `0.` otherwise.
    Dot,
    /// Append ` <glyph> `.
    Operator(Operator),
    /// Append `)` after `(`, `(` otherwise.
    Paren,
    Percent,
    ToggleSign,
    Clear,
    Backspace,
    Equals,
    Derived(DerivedOp),
    MemoryStore,
    MemoryRecall,
    MemoryClear,
    Copy,
    ToggleTheme,
}

/// What the result line currently shows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResultLine {
    Value(f64),
    /// Live evaluation of the buffer failed.
    Invalid,
    /// An explicit action failed.
    Failed,
}

impl ResultLine {
    pub fn text(&self) -> String {
        match self {
            Self::Value(value) => format_display(*value),
            Self::Invalid => "Err".to_string(),
            Self::Failed => "Error".to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Value(_))
    }
}

type CopyCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// The whole calculator: buffer, memory register, history and theme.
pub struct CalculatorState {
    expression: String,
    memory: f64,
    history: HistoryLog,
    theme: ThemeKind,
    result: ResultLine,
    notice: Option<String>,
    copy_on_equals: bool,
    on_copy: Option<CopyCallback>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl CalculatorState {
    pub fn new(config: &Config) -> Self {
        Self {
            expression: String::new(),
            memory: 0.0,
            history: HistoryLog::new(config.history_limit),
            theme: config.theme,
            result: ResultLine::Value(0.0),
            notice: None,
            copy_on_equals: config.copy_on_equals,
            on_copy: None,
        }
    }

    /// Set callback for copying text to the clipboard.
    pub fn set_on_copy(&mut self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.on_copy = Some(Arc::new(callback));
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The expression line: the buffer, or `0` when empty.
    pub fn expression_line(&self) -> &str {
        if self.expression.is_empty() {
            "0"
        } else {
            &self.expression
        }
    }

    pub fn result(&self) -> ResultLine {
        self.result
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    /// One-off message from the last action (e.g. "Stored to memory").
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply an action.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, expression = %self.expression, "dispatch");
        self.notice = None;

        match action {
            Action::Insert(text) => self.edit(|expr| expr.push_str(&text)),
            Action::Dot => self.edit(|expr| {
                let after_digit = expr.chars().last().is_some_and(|c| c.is_ascii_digit());
                expr.push_str(if after_digit { "." } else { "0." });
            }),
            Action::Operator(op) => self.edit(|expr| {
                expr.push(' ');
                expr.push(op.glyph());
                expr.push(' ');
            }),
            Action::Paren => self.edit(|expr| {
                let open = expr.trim_end().ends_with('(');
                expr.push(if open { ')' } else { '(' });
            }),
            Action::Percent => self.edit(|expr| expr.push('%')),
            Action::ToggleSign => self.edit(|expr| *expr = toggle_sign(expr)),
            Action::Clear => self.edit(String::clear),
            Action::Backspace => self.edit(|expr| {
                expr.pop();
            }),
            Action::Equals => self.equals(),
            Action::Derived(op) => self.derived(op),
            Action::MemoryStore => self.memory_store(),
            Action::MemoryRecall => {
                let recalled = format_value(self.memory);
                self.edit(|expr| expr.push_str(&recalled));
            }
            Action::MemoryClear => {
                self.memory = 0.0;
                info!("memory cleared");
                self.notice = Some("Memory cleared".to_string());
            }
            Action::Copy => {
                let text = self.clipboard_text();
                self.copy(&text);
                self.notice = Some("Result copied".to_string());
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                info!(theme = ?self.theme, "theme toggled");
            }
        }
    }

    /// Re-evaluate the buffer for the result line.
    pub fn refresh(&mut self) {
        self.result = match evaluate(&self.expression) {
            Ok(value) => ResultLine::Value(value),
            Err(_) => ResultLine::Invalid,
        };
    }

    fn edit(&mut self, f: impl FnOnce(&mut String)) {
        f(&mut self.expression);
        self.refresh();
    }

    fn equals(&mut self) {
        match evaluate(&self.expression) {
            Ok(value) => {
                let input = std::mem::take(&mut self.expression);
                self.commit(input, value);
                if self.copy_on_equals {
                    self.copy(&format_value(value));
                }
            }
            Err(e) => self.fail("equals", &e),
        }
    }

    fn derived(&mut self, op: DerivedOp) {
        match evaluate(&self.expression).and_then(|value| op.apply(value)) {
            Ok(value) => {
                let label = op.label(&self.expression);
                self.commit(label, value);
            }
            Err(e) => self.fail("derived operation", &e),
        }
    }

    fn memory_store(&mut self) {
        match evaluate(&self.expression) {
            Ok(value) => {
                self.memory = round_result(self.memory + value);
                info!(memory = self.memory, "stored to memory");
                self.notice = Some("Stored to memory".to_string());
            }
            Err(e) => self.fail("memory store", &e),
        }
    }

    /// Record a result and continue editing from it.
    fn commit(&mut self, input: String, value: f64) {
        self.history.push(HistoryItem::new(input, value));
        self.expression = format_value(value);
        self.refresh();
    }

    fn fail(&mut self, what: &str, error: &EvalError) {
        debug!(%error, "{} failed", what);
        self.result = ResultLine::Failed;
        self.notice = Some(error.to_string());
    }

    /// Raw number for a value result, or the error text as shown.
    fn clipboard_text(&self) -> String {
        match self.result {
            ResultLine::Value(value) => format_value(value),
            other => other.text(),
        }
    }

    fn copy(&self, text: &str) {
        match self.on_copy {
            Some(ref on_copy) => on_copy(text),
            None => warn!("no clipboard attached; dropping copy of {:?}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn press(state: &mut CalculatorState, keys: &str) {
        for c in keys.chars() {
            state.dispatch(Action::Insert(c.to_string()));
        }
    }

    #[test]
    fn test_live_result() {
        let mut state = CalculatorState::default();
        assert_eq!(state.expression_line(), "0");
        assert_eq!(state.result(), ResultLine::Value(0.0));

        press(&mut state, "2+3*4");
        assert_eq!(state.result(), ResultLine::Value(14.0));

        press(&mut state, "+");
        assert_eq!(state.result(), ResultLine::Invalid);
        assert_eq!(state.result().text(), "Err");
        assert_eq!(state.expression(), "2+3*4+");
    }

    #[test]
    fn test_equals_records_history_and_continues() {
        let mut state = CalculatorState::default();
        press(&mut state, "0.1+0.2");
        state.dispatch(Action::Equals);

        assert_eq!(state.expression(), "0.3");
        let latest = state.history().latest().unwrap();
        assert_eq!(latest.input, "0.1+0.2");
        assert_eq!(latest.output, 0.3);

        press(&mut state, "5");
        assert_eq!(state.expression(), "0.35");
    }

    #[test]
    fn test_failed_equals_leaves_state() {
        let mut state = CalculatorState::default();
        press(&mut state, "10/0");
        state.dispatch(Action::Equals);

        assert_eq!(state.expression(), "10/0");
        assert!(state.history().is_empty());
        assert_eq!(state.result().text(), "Error");
        assert_eq!(state.notice(), Some("math error: division by zero"));
    }

    #[test]
    fn test_failure_notice_names_the_error() {
        let mut state = CalculatorState::default();
        press(&mut state, "-9");
        state.dispatch(Action::Derived(DerivedOp::SquareRoot));
        assert_eq!(state.notice(), Some("math error: square root of a negative number"));

        state.dispatch(Action::Operator(Operator::Add));
        state.dispatch(Action::Equals);
        assert!(state.notice().is_some_and(|n| n.starts_with("parse error:")));
    }

    #[test]
    fn test_configured_history_limit_is_capped() {
        let config = Config {
            history_limit: 500,
            ..Config::default()
        };
        let mut state = CalculatorState::new(&config);
        for i in 0..60 {
            state.dispatch(Action::Clear);
            press(&mut state, &format!("{i}+1"));
            state.dispatch(Action::Equals);
        }
        assert_eq!(state.history().len(), 50);
        assert_eq!(state.history().latest().unwrap().input, "59+1");
    }

    #[test]
    fn test_reciprocal_of_zero() {
        let mut state = CalculatorState::default();
        press(&mut state, "3-3");
        state.dispatch(Action::Derived(DerivedOp::Reciprocal));

        assert_eq!(state.expression(), "3-3");
        assert!(state.history().is_empty());
        assert_eq!(state.result(), ResultLine::Failed);
    }

    #[test]
    fn test_derived_ops() {
        let mut state = CalculatorState::default();
        press(&mut state, "4+5");
        state.dispatch(Action::Derived(DerivedOp::SquareRoot));
        assert_eq!(state.expression(), "3");
        assert_eq!(state.history().latest().unwrap().input, "√(4+5)");

        state.dispatch(Action::Derived(DerivedOp::Square));
        assert_eq!(state.expression(), "9");
        assert_eq!(state.history().latest().unwrap().input, "sqr(3)");

        state.dispatch(Action::Derived(DerivedOp::Reciprocal));
        assert_eq!(state.expression(), "0.111111111111");
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn test_sqrt_of_negative_fails() {
        let mut state = CalculatorState::default();
        press(&mut state, "-4");
        state.dispatch(Action::Derived(DerivedOp::SquareRoot));
        assert_eq!(state.expression(), "-4");
        assert_eq!(state.result(), ResultLine::Failed);
    }

    #[test]
    fn test_button_editing() {
        let mut state = CalculatorState::default();
        state.dispatch(Action::Dot);
        assert_eq!(state.expression(), "0.");
        press(&mut state, "5");
        state.dispatch(Action::Dot);
        assert_eq!(state.expression(), "0.5.");
        state.dispatch(Action::Backspace);

        state.dispatch(Action::Operator(Operator::Multiply));
        assert_eq!(state.expression(), "0.5 × ");
        state.dispatch(Action::Paren);
        press(&mut state, "2");
        state.dispatch(Action::Operator(Operator::Add));
        press(&mut state, "6");
        assert_eq!(state.expression(), "0.5 × (2 + 6");
        state.dispatch(Action::Paren);
        assert_eq!(state.expression(), "0.5 × (2 + 6(");

        state.dispatch(Action::Backspace);
        press(&mut state, ")");
        assert_eq!(state.result(), ResultLine::Value(4.0));

        state.dispatch(Action::Clear);
        assert_eq!(state.expression(), "");
        assert_eq!(state.result(), ResultLine::Value(0.0));
    }

    #[test]
    fn test_paren_closes_empty_group() {
        let mut state = CalculatorState::default();
        state.dispatch(Action::Paren);
        state.dispatch(Action::Paren);
        assert_eq!(state.expression(), "()");
    }

    #[test]
    fn test_percent_and_sign() {
        let mut state = CalculatorState::default();
        press(&mut state, "5");
        state.dispatch(Action::Percent);
        assert_eq!(state.expression(), "5%");
        assert_eq!(state.result(), ResultLine::Value(0.05));

        state.dispatch(Action::Clear);
        press(&mut state, "12+34");
        state.dispatch(Action::ToggleSign);
        assert_eq!(state.expression(), "12+-34");
        assert_eq!(state.result(), ResultLine::Value(-22.0));
    }

    #[test]
    fn test_memory_register() {
        let mut state = CalculatorState::default();
        press(&mut state, "2.5");
        state.dispatch(Action::MemoryStore);
        state.dispatch(Action::MemoryStore);
        assert_eq!(state.memory(), 5.0);
        assert_eq!(state.notice(), Some("Stored to memory"));

        state.dispatch(Action::Clear);
        press(&mut state, "1+");
        state.dispatch(Action::MemoryRecall);
        assert_eq!(state.expression(), "1+5");

        state.dispatch(Action::Operator(Operator::Divide));
        state.dispatch(Action::MemoryStore);
        assert_eq!(state.memory(), 5.0);
        assert_eq!(state.result(), ResultLine::Failed);

        state.dispatch(Action::MemoryClear);
        assert_eq!(state.memory(), 0.0);
    }

    #[test]
    fn test_empty_store_adds_zero() {
        let mut state = CalculatorState::default();
        state.dispatch(Action::MemoryStore);
        assert_eq!(state.memory(), 0.0);
    }

    #[test]
    fn test_history_cap() {
        let mut state = CalculatorState::default();
        for i in 0..51 {
            state.dispatch(Action::Clear);
            press(&mut state, &format!("{i}+0"));
            state.dispatch(Action::Equals);
        }

        let history = state.history();
        assert_eq!(history.len(), 50);
        assert!(history.iter().all(|item| item.input != "0+0"));
        assert_eq!(history.latest().unwrap().input, "50+0");
        assert_eq!(history.get(49).unwrap().input, "1+0");
    }

    #[test]
    fn test_copy_uses_callback() {
        let copied = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&copied);

        let config = Config {
            copy_on_equals: true,
            ..Config::default()
        };
        let mut state = CalculatorState::new(&config);
        state.set_on_copy(move |text| sink.lock().unwrap().push(text.to_string()));

        press(&mut state, "1000*1000");
        state.dispatch(Action::Copy);
        state.dispatch(Action::Equals);
        press(&mut state, "/");
        state.dispatch(Action::Copy);

        assert_eq!(*copied.lock().unwrap(), ["1000000", "1000000", "Err"]);
    }

    #[test]
    fn test_theme_toggle() {
        let mut state = CalculatorState::default();
        assert_eq!(state.theme(), ThemeKind::Dark);
        state.dispatch(Action::ToggleTheme);
        assert_eq!(state.theme(), ThemeKind::Light);
        state.dispatch(Action::ToggleTheme);
        assert_eq!(state.theme(), ThemeKind::Dark);
    }
}

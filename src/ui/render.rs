//! Text rendering of the calculator display and the history panel.

use crate::items::{HistoryItem, HistoryLog};
use crate::state::CalculatorState;

/// Render the display: expression line, result line and status.
///
/// The result is shown with a "= " prefix, in the error color when the
/// last evaluation failed.
pub fn render_display(state: &CalculatorState, color: bool) -> String {
    let t = state.theme().palette();

    let expression = t.paint(t.expression_color, state.expression_line(), color);

    let result = state.result();
    let result_color = if result.is_error() {
        t.error_color
    } else {
        t.result_color
    };
    let result_line = t.paint(result_color, &format!("= {}", result.text()), color);

    let mut out = format!("{}\n{}", expression, result_line);

    let mut status = Vec::new();
    if state.memory() != 0.0 {
        status.push("M".to_string());
    }
    if let Some(notice) = state.notice() {
        status.push(notice.to_string());
    }
    if !status.is_empty() {
        out.push('\n');
        out.push_str(&t.paint(t.accent_color, &status.join("  "), color));
    }
    out
}

/// Render the history panel, most recent first.
pub fn render_history(state: &CalculatorState, color: bool) -> String {
    let history: &HistoryLog = state.history();
    let t = state.theme().palette();

    if history.is_empty() {
        return t.paint(t.muted_color, "No history", color);
    }

    history
        .iter()
        .map(|item| render_history_item(item, state, color))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_history_item(item: &HistoryItem, state: &CalculatorState, color: bool) -> String {
    let t = state.theme().palette();
    format!(
        "{}\n  {}",
        t.paint(t.expression_color, &item.input, color),
        t.paint(t.muted_color, &format!("= {}", item.display_result()), color)
    )
}

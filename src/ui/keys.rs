//! Mapping of typed keys and command words to calculator actions.

use tracing::debug;

use crate::calculator::DerivedOp;
use crate::state::{Action, Operator};

/// One unit of interactive input.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Action(Action),
    ShowHistory,
    Help,
    Quit,
}

pub const HELP: &str = "\
keys:     0-9 . + - * / ( ) × ÷ % =   (an empty line is =)
buttons:  dot paren plus minus times divide neg c bs
derived:  sqrt sqr inv
memory:   ms mr mc
other:    copy theme history help quit";

/// Map a single typed character to an action, as the keyboard does.
pub fn action_for_key(key: char) -> Option<Action> {
    match key {
        '0'..='9' | '+' | '-' | '*' | '/' | '(' | ')' | '.' | '×' | '÷' => {
            Some(Action::Insert(key.to_string()))
        }
        '%' => Some(Action::Percent),
        '=' => Some(Action::Equals),
        '\u{8}' | '\u{7f}' => Some(Action::Backspace),
        _ => None,
    }
}

/// Map a button or command word.
pub fn command_for_word(word: &str) -> Option<Command> {
    let action = match word.to_lowercase().as_str() {
        "dot" => Action::Dot,
        "paren" => Action::Paren,
        "plus" => Action::Operator(Operator::Add),
        "minus" => Action::Operator(Operator::Subtract),
        "times" => Action::Operator(Operator::Multiply),
        "divide" => Action::Operator(Operator::Divide),
        "neg" => Action::ToggleSign,
        "pct" => Action::Percent,
        "c" | "clear" => Action::Clear,
        "bs" | "back" => Action::Backspace,
        "sqrt" => Action::Derived(DerivedOp::SquareRoot),
        "sqr" => Action::Derived(DerivedOp::Square),
        "inv" => Action::Derived(DerivedOp::Reciprocal),
        "ms" => Action::MemoryStore,
        "mr" => Action::MemoryRecall,
        "mc" => Action::MemoryClear,
        "copy" => Action::Copy,
        "theme" => Action::ToggleTheme,
        "history" => return Some(Command::ShowHistory),
        "help" | "?" => return Some(Command::Help),
        "q" | "quit" | "exit" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Action(action))
}

/// Split an input line into commands.
///
/// Whitespace separates tokens. A token that is a command word maps to
/// that command; any other token is fed key by key. An empty line is `=`.
pub fn parse_line(line: &str) -> Vec<Command> {
    let line = line.trim();
    if line.is_empty() {
        return vec![Command::Action(Action::Equals)];
    }

    let mut commands = Vec::new();
    for token in line.split_whitespace() {
        if let Some(command) = command_for_word(token) {
            commands.push(command);
            continue;
        }
        for key in token.chars() {
            match action_for_key(key) {
                Some(action) => commands.push(Command::Action(action)),
                None => debug!(?key, "ignoring unmapped key"),
            }
        }
    }
    commands
}

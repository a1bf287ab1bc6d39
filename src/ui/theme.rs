//! Terminal color palettes for the dark and light themes.

use serde::Deserialize;

/// Which palette is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn palette(self) -> &'static CalcTheme {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

/// ANSI escape sequences used when rendering.
#[derive(Debug)]
pub struct CalcTheme {
    pub expression_color: &'static str,
    pub result_color: &'static str,
    pub error_color: &'static str,
    pub muted_color: &'static str,
    pub accent_color: &'static str,
}

pub const RESET: &str = "\x1b[0m";

static DARK: CalcTheme = CalcTheme {
    expression_color: "\x1b[38;2;154;168;189m",
    result_color: "\x1b[1;38;2;230;237;247m",
    error_color: "\x1b[38;2;240;128;96m",
    muted_color: "\x1b[2;38;2;154;168;189m",
    accent_color: "\x1b[38;2;102;170;235m",
};

static LIGHT: CalcTheme = CalcTheme {
    expression_color: "\x1b[38;2;71;85;105m",
    result_color: "\x1b[1;38;2;11;18;32m",
    error_color: "\x1b[38;2;200;60;40m",
    muted_color: "\x1b[38;2;100;116;139m",
    accent_color: "\x1b[38;2;37;99;235m",
};

impl CalcTheme {
    /// Wrap `text` in `color` when colors are enabled.
    pub fn paint(&self, color: &str, text: &str, enabled: bool) -> String {
        if enabled {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

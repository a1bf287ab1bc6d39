pub mod keys;
pub mod render;
pub mod theme;

pub use keys::{Command, parse_line};
pub use render::{render_display, render_history};
pub use theme::{CalcTheme, ThemeKind};

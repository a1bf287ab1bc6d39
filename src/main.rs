//! # curvedcalc
//!
//! ```bash
//! # Interactive session
//! curvedcalc
//!
//! # Evaluate once
//! curvedcalc "12 × 3 + 5%"
//! curvedcalc --json "(2 + 3) * 4"
//! ```

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use curvedcalc::calculator::{copy_to_clipboard, evaluate_expression};
use curvedcalc::config::Config;
use curvedcalc::state::CalculatorState;
use curvedcalc::ui::{Command, ThemeKind, keys, parse_line, render_display, render_history};

/// Arithmetic calculator with history and a memory register
#[derive(Parser, Debug)]
#[command(name = "curvedcalc")]
#[command(version)]
#[command(about = "Arithmetic calculator with history and a memory register", long_about = None)]
struct Args {
    /// Evaluate this expression and exit
    expression: Option<String>,

    /// Print the evaluation as JSON (with an expression)
    #[arg(long)]
    json: bool,

    /// Start with the light theme
    #[arg(long)]
    light: bool,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = Config::load(args.config.as_deref());
    if args.light {
        config.theme = ThemeKind::Light;
    }

    match args.expression {
        Some(expression) => evaluate_once(&expression, args.json),
        None => run_interactive(&config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn evaluate_once(expression: &str, json: bool) -> anyhow::Result<()> {
    let evaluation = evaluate_expression(expression)
        .with_context(|| format!("Failed to evaluate '{}'", expression))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        println!("{}", evaluation.clipboard());
    }
    Ok(())
}

fn run_interactive(config: &Config) -> anyhow::Result<()> {
    let mut state = CalculatorState::new(config);
    state.set_on_copy(|text| {
        if let Err(e) = copy_to_clipboard(text) {
            warn!("{:#}", e);
        }
    });

    let color = io::stdout().is_terminal();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "{}\n", render_display(&state, color))?;
    prompt(&mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;

        for command in parse_line(&line) {
            match command {
                Command::Action(action) => state.dispatch(action),
                Command::ShowHistory => writeln!(stdout, "{}\n", render_history(&state, color))?,
                Command::Help => writeln!(stdout, "{}\n", keys::HELP)?,
                Command::Quit => return Ok(()),
            }
        }

        writeln!(stdout, "{}\n", render_display(&state, color))?;
        prompt(&mut stdout)?;
    }
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

//! Editor handler: opens the TUI playground.

use std::io;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;

use crate::config::Config;
use crate::tui::run_editor;

/// Seeded into an empty editor so a first run has something to show.
const EXAMPLE_PROGRAM: &str = r#"note: JF Language Example Code

name is "World".
greeting is "Hello, " + name + "!".

console.print(greeting).
console.print("1 + 2 is", 1 + 2).
"#;

pub async fn run(cfg: &Config, file: Option<&str>) -> Result<()> {
    if !io::stdout().is_terminal() {
        eprintln!("Warning: the editor requires a proper terminal.");
        eprintln!("Pipe a program on stdin or pass --exec to run headless instead.");
        return Err(anyhow::anyhow!("the editor requires a terminal environment"));
    }

    let initial = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {path}"))?,
        None => EXAMPLE_PROGRAM.to_string(),
    };

    run_editor(cfg, &initial).await
}

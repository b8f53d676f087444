use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;

use jfpad::cli::Cli;
use jfpad::config::Config;
use jfpad::handlers;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    // Load config
    let cfg = Config::load();

    // stdin handling (pipe support): piped input is a program to run,
    // since the editor needs a tty on both ends anyway.
    let stdin_is_tty = io::stdin().is_terminal();
    let mut program_from_stdin = String::new();
    if !stdin_is_tty {
        io::stdin().read_to_string(&mut program_from_stdin)?;
    }

    // A file argument cannot be combined with piped input
    if args.file.is_some() && !stdin_is_tty {
        bail!("a FILE argument cannot be combined with piped stdin");
    }

    if args.exec || !stdin_is_tty {
        let program = if let Some(path) = args.file.as_deref() {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        } else if !stdin_is_tty {
            // May be empty; the remote interpreter decides what an empty
            // program means.
            program_from_stdin
        } else {
            bail!("no program provided: pass a FILE or pipe source on stdin");
        };
        return handlers::oneshot::run(&cfg, &program).await;
    }

    handlers::edit::run(&cfg, args.file.as_deref()).await
}

//! Headless handler: run one program and print the outcome.

use anyhow::Result;
use log::debug;

use crate::config::Config;
use crate::printer::TextPrinter;
use crate::remote::RunClient;
use crate::runner::{RunOutcome, UNREACHABLE_MESSAGE};

/// Exit status 1 on any failure, program-level or transport-level.
pub async fn run(cfg: &Config, program: &str) -> Result<()> {
    let client = RunClient::from_config(cfg)?;
    let printer = TextPrinter { color: None };
    let error_printer = TextPrinter { color: Some("red") };

    match client.execute(program).await {
        Ok(reply) => match RunOutcome::from_reply(reply) {
            RunOutcome::Success { output } => {
                printer.print(&output);
                Ok(())
            }
            RunOutcome::Failure { output, error } => {
                let mut rendered = output;
                rendered.push_str(&error);
                error_printer.print(&rendered);
                std::process::exit(1)
            }
        },
        Err(err) => {
            debug!("transport failure: {err}");
            error_printer.print(UNREACHABLE_MESSAGE);
            std::process::exit(1)
        }
    }
}

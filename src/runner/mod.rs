//! The execution request/response core: one cycle per trigger, a
//! three-state UI machine and the reply classifier.

use log::debug;

use crate::remote::{RemoteError, RunClient, RunReply};

/// Shown in the output sink while a cycle is in flight.
pub const EXECUTING_NOTICE: &str = "Executing...";

/// Fixed diagnostic for transport-tier failures.
pub const UNREACHABLE_MESSAGE: &str = "unable to reach the execution service";

/// Read/write access to the program text.
pub trait SourceBuffer {
    fn text(&self) -> String;
    fn set_text(&mut self, text: &str);
}

/// Display surface receiving rendered results plus an error-styling flag.
pub trait OutputSink {
    fn set_text(&mut self, text: &str);
    fn set_error_flag(&mut self, error: bool);
}

/// UI-visible lifecycle of the client. `Settled` is the resting state
/// pending the next trigger, not a terminal one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Executing,
    Settled { ok: bool },
}

/// A service reply classified for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success { output: String },
    Failure { output: String, error: String },
}

impl RunOutcome {
    /// An absent or empty `error` field signals success.
    pub fn from_reply(reply: RunReply) -> Self {
        match reply.error {
            Some(error) if !error.is_empty() => RunOutcome::Failure {
                output: reply.output,
                error,
            },
            _ => RunOutcome::Success { output: reply.output },
        }
    }
}

/// Owns the source buffer, the output sink and the cycle state machine.
/// Runs exactly one request/response cycle per accepted trigger; trigger
/// activations while a cycle is in flight are dropped, so no two cycles
/// ever race on the sink.
#[derive(Debug)]
pub struct ExecutionClient<S, K> {
    source: S,
    sink: K,
    state: UiState,
}

impl<S: SourceBuffer, K: OutputSink> ExecutionClient<S, K> {
    pub fn new(source: S, sink: K) -> Self {
        Self {
            source,
            sink,
            state: UiState::Idle,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Begin a cycle: snapshot the source, show the transient notice and
    /// clear any prior error styling. Returns `None` while a cycle is
    /// already in flight; that activation is dropped entirely.
    pub fn trigger(&mut self) -> Option<String> {
        if self.state == UiState::Executing {
            debug!("trigger ignored: a cycle is already in flight");
            return None;
        }
        self.state = UiState::Executing;
        self.sink.set_text(EXECUTING_NOTICE);
        self.sink.set_error_flag(false);
        Some(self.source.text())
    }

    /// Finish the in-flight cycle with the transport's verdict. A remote
    /// program failure arrives as `Ok` with `error` set; only an inability
    /// to communicate (or a reply we cannot parse) arrives as `Err`.
    pub fn settle(&mut self, result: Result<RunReply, RemoteError>) {
        let ok = match result {
            Ok(reply) => match RunOutcome::from_reply(reply) {
                RunOutcome::Success { output } => {
                    self.sink.set_text(&output);
                    self.sink.set_error_flag(false);
                    true
                }
                RunOutcome::Failure { output, error } => {
                    // Partial output first, diagnostic right after it.
                    let mut rendered = output;
                    rendered.push_str(&error);
                    self.sink.set_text(&rendered);
                    self.sink.set_error_flag(true);
                    false
                }
            },
            Err(err) => {
                debug!("cycle failed at the transport tier: {err}");
                self.sink.set_text(UNREACHABLE_MESSAGE);
                self.sink.set_error_flag(true);
                false
            }
        };
        self.state = UiState::Settled { ok };
    }

    /// One full cycle against the service. For drivers that do not need
    /// to interleave rendering with the network wait.
    pub async fn run_once(&mut self, remote: &RunClient) {
        if let Some(code) = self.trigger() {
            let result = remote.execute(&code).await;
            self.settle(result);
        }
    }
}

//! Event types for the playground TUI.

use crossterm::event::KeyEvent;

use crate::remote::{RemoteError, RunReply};

/// Events flowing through the TUI channel.
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input.
    Key(KeyEvent),
    /// The in-flight execution cycle finished, well or badly.
    RunCompleted(Result<RunReply, RemoteError>),
}

//! Async event loop for the playground TUI.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;

use super::{app::App, events::TuiEvent, ui::render_ui};
use crate::config::Config;
use crate::remote::RunClient;

/// Run the playground editor until the user quits.
pub async fn run_editor(cfg: &Config, initial_text: &str) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let remote = RunClient::from_config(cfg)?;
    let mut app = App::new(initial_text);

    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    let result = run_app(&mut terminal, &mut app, remote, event_tx, event_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    remote: RunClient,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        loop {
            // Poll for keyboard events
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if input_tx.send(TuiEvent::Key(key)).is_err() {
                        break; // Channel closed
                    }
                }
            }
        }
    });

    loop {
        // Render UI
        terminal.draw(|frame| render_ui(frame, app))?;

        // Handle events
        if let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &remote, &event_tx) {
                        break; // Quit requested
                    }
                }
                TuiEvent::RunCompleted(result) => {
                    app.client.settle(result);
                    app.update_status();
                }
            }
        }

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await;
    }

    Ok(())
}

/// Handle keyboard events. Returns true when the user asked to quit.
fn handle_key_event(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    remote: &RunClient,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
) -> bool {
    // While the help overlay is up, any key closes it
    if app.show_help {
        app.show_help = false;
        return false;
    }

    match key.code {
        KeyCode::Char('q' | 'c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return true;
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // One accepted trigger = one cycle; activations while a cycle
            // is in flight return None and are dropped.
            if let Some(code) = app.client.trigger() {
                app.update_status();
                let remote = remote.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let result = remote.execute(&code).await;
                    let _ = tx.send(TuiEvent::RunCompleted(result));
                });
            }
        }
        KeyCode::F(1) => {
            app.toggle_help();
        }
        KeyCode::PageUp => {
            app.client.sink_mut().scroll_up();
        }
        KeyCode::PageDown => {
            app.client.sink_mut().scroll_down();
        }
        KeyCode::Enter => {
            app.client.source_mut().insert_newline();
        }
        KeyCode::Backspace => {
            app.client.source_mut().backspace();
        }
        KeyCode::Delete => {
            app.client.source_mut().delete();
        }
        KeyCode::Left => {
            app.client.source_mut().move_cursor_left();
        }
        KeyCode::Right => {
            app.client.source_mut().move_cursor_right();
        }
        KeyCode::Up => {
            app.client.source_mut().move_cursor_up();
        }
        KeyCode::Down => {
            app.client.source_mut().move_cursor_down();
        }
        KeyCode::Home => {
            app.client.source_mut().move_cursor_home();
        }
        KeyCode::End => {
            app.client.source_mut().move_cursor_end();
        }
        KeyCode::Tab => {
            for _ in 0..4 {
                app.client.source_mut().insert_char(' ');
            }
        }
        KeyCode::Char(c) => {
            app.client.source_mut().insert_char(c);
        }
        _ => {}
    }

    false
}

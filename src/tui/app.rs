//! TUI application state: the editor buffer, the output pane and the
//! execution client that owns them.

use crate::runner::{ExecutionClient, OutputSink, SourceBuffer, UiState};

/// In-memory editor buffer with line/column cursor editing.
///
/// The cursor column counts characters, not bytes, so editing stays on
/// char boundaries for non-ASCII source.
#[derive(Debug)]
pub struct EditorBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    fn current_line(&self) -> &str {
        &self.lines[self.cursor_row]
    }

    fn line_chars(&self) -> usize {
        self.current_line().chars().count()
    }

    fn byte_index(line: &str, col: usize) -> usize {
        line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
    }

    // ----- Input editing helpers -----

    pub fn insert_char(&mut self, c: char) {
        let at = Self::byte_index(self.current_line(), self.cursor_col);
        self.lines[self.cursor_row].insert(at, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let at = Self::byte_index(self.current_line(), self.cursor_col);
        let rest = self.lines[self.cursor_row].split_off(at);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let at = Self::byte_index(self.current_line(), self.cursor_col - 1);
            self.lines[self.cursor_row].remove(at);
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            // At the start of a line, merge with the previous line and
            // leave the cursor on the seam.
            let current = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.line_chars();
            self.lines[self.cursor_row].push_str(&current);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_col < self.line_chars() {
            let at = Self::byte_index(self.current_line(), self.cursor_col);
            self.lines[self.cursor_row].remove(at);
        } else if self.cursor_row + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_row + 1);
            self.lines[self.cursor_row].push_str(&next);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.line_chars();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_col < self.line_chars() {
            self.cursor_col += 1;
        } else if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_row > 0 {
            self.cursor_row -= 1;
            self.cursor_col = self.cursor_col.min(self.line_chars());
        }
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_row + 1 < self.lines.len() {
            self.cursor_row += 1;
            self.cursor_col = self.cursor_col.min(self.line_chars());
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_col = self.line_chars();
    }
}

impl SourceBuffer for EditorBuffer {
    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
    }
}

/// Result surface under the editor; rendered red while the error flag
/// is set.
#[derive(Debug, Default)]
pub struct OutputPane {
    text: String,
    error: bool,
    scroll: usize,
}

impl OutputPane {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error_flag(&self) -> bool {
        self.error
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll += 1;
    }
}

impl OutputSink for OutputPane {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.scroll = 0;
    }

    fn set_error_flag(&mut self, error: bool) {
        self.error = error;
    }
}

/// Application state for the playground TUI.
#[derive(Debug)]
pub struct App {
    /// The request/response core; owns the editor buffer and output pane.
    pub client: ExecutionClient<EditorBuffer, OutputPane>,
    /// Status line under the panes.
    pub status_message: String,
    /// Whether the help overlay is up.
    pub show_help: bool,
}

impl App {
    pub fn new(initial_text: &str) -> Self {
        let client = ExecutionClient::new(
            EditorBuffer::from_text(initial_text),
            OutputPane::default(),
        );
        let mut app = Self {
            client,
            status_message: String::new(),
            show_help: false,
        };
        app.update_status();
        app
    }

    pub fn update_status(&mut self) {
        self.status_message = match self.client.state() {
            UiState::Idle => "Ready | ctrl+r run, ctrl+q quit, F1 help",
            UiState::Executing => "Executing | ctrl+q quit",
            UiState::Settled { ok: true } => "Done | ctrl+r run again, F1 help",
            UiState::Settled { ok: false } => "Failed | ctrl+r run again, F1 help",
        }
        .to_string();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

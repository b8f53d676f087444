//! UI layout and rendering for the playground.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::app::App;
use crate::runner::UiState;

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),         // Editor
            Constraint::Percentage(35), // Output
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_editor(frame, app, main_layout[0]);
    render_output(frame, app, main_layout[1]);
    render_status_bar(frame, app, main_layout[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

/// Render the editor pane with a line-number gutter
fn render_editor(frame: &mut Frame, app: &App, area: Rect) {
    let editor = app.client.source();
    let height = area.height.saturating_sub(2) as usize;

    // Keep the cursor line visible
    let scroll = editor
        .cursor_row()
        .saturating_sub(height.saturating_sub(1));

    let gutter = editor.line_count().to_string().len().max(2);
    let mut content_lines = Vec::new();
    for (i, line) in editor.lines().iter().enumerate().skip(scroll).take(height) {
        content_lines.push(Line::from(vec![
            Span::styled(
                format!("{:>gutter$} ", i + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(line.clone()),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(content_lines))
        .block(Block::default().borders(Borders::ALL).title("Editor"));
    frame.render_widget(paragraph, area);

    // Place the terminal cursor inside the pane; no wrapping here, so the
    // screen column is the display width of the line prefix.
    let line = &editor.lines()[editor.cursor_row()];
    let prefix: String = line.chars().take(editor.cursor_col()).collect();
    let x = area.x + 1 + gutter as u16 + 1 + prefix.width() as u16;
    let y = area.y + 1 + (editor.cursor_row() - scroll) as u16;
    if x < area.x + area.width.saturating_sub(1) && y < area.y + area.height.saturating_sub(1) {
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// Render the output pane; red while the error flag is set
fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let sink = app.client.sink();
    let executing = app.client.state() == UiState::Executing;

    let (text_style, border_style) = if sink.error_flag() {
        (
            Style::default().fg(Color::Red),
            Style::default().fg(Color::Red),
        )
    } else if executing {
        (Style::default().fg(Color::Yellow), Style::default())
    } else {
        (Style::default().fg(Color::Cyan), Style::default())
    };

    let content_lines: Vec<Line> = sink
        .text()
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), text_style)))
        .collect();

    let height = area.height.saturating_sub(2) as usize;
    let scroll = sink.scroll().min(content_lines.len().saturating_sub(height)) as u16;

    let paragraph = Paragraph::new(Text::from(content_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Output"),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status_paragraph = Paragraph::new(app.status_message.clone())
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_paragraph, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    let popup_area = centered_rect(70, 60, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("JF Playground Help"),
        Line::from(""),
        Line::from("Run:"),
        Line::from("  Ctrl+R     - Execute the program"),
        Line::from(""),
        Line::from("Editing:"),
        Line::from("  Arrows     - Move the cursor"),
        Line::from("  Home/End   - Start/end of line"),
        Line::from("  Tab        - Insert four spaces"),
        Line::from(""),
        Line::from("Output:"),
        Line::from("  PgUp/PgDn  - Scroll the output pane"),
        Line::from(""),
        Line::from("  F1         - Toggle this help"),
        Line::from("  Ctrl+Q     - Quit"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

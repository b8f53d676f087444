//! Plain-text printer for headless runs.

use owo_colors::OwoColorize;

pub struct TextPrinter {
    pub color: Option<&'static str>,
}

impl TextPrinter {
    /// Print `text` followed by exactly one newline; interpreter output
    /// usually carries its own trailing newline already.
    pub fn print(&self, text: &str) {
        let body = text.strip_suffix('\n').unwrap_or(text);
        if let Some(c) = self.color {
            match c {
                "red" => println!("{}", body.red()),
                "yellow" => println!("{}", body.yellow()),
                _ => println!("{}", body),
            }
        } else {
            println!("{}", body);
        }
    }
}

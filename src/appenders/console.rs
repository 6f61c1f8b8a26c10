//! Human-readable text blocks
//!
//! ```text
//! ===============WARN================
//!  disk almost full
//!  2024-03-09 07:05:01 @main.rs:42
//! 	- storage.mount : /var
//! ====================================
//! ```

use crate::core::{LogEntry, LogLevel};
use colored::Color;

const BANNER_FILL: &str = "===============";
const BANNER_TAIL: &str = "================";
const CLOSING_BANNER: &str = "====================================";
const DIM: Color = Color::BrightBlack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRenderer {
    use_colors: bool,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    /// Render a complete block, trailing newline included
    ///
    /// `entry.attrs` are expected to be merged already; each key is prefixed
    /// with `group.` when a group is given.
    pub fn render(&self, entry: &LogEntry, group: Option<&str>) -> String {
        let color = entry.level.color();
        let prefix = group_prefix(group);

        let mut block = String::with_capacity(128 + entry.attrs.len() * 32);
        block.push_str(&self.paint(color, &banner(entry.level)));
        block.push('\n');

        block.push(' ');
        block.push_str(&self.paint(color, &sanitize(&entry.message)));
        block.push('\n');

        let mut stamp = entry.formatted_timestamp();
        if let Some(source) = entry.source {
            stamp.push_str(" @");
            stamp.push_str(&source.to_string());
        }
        block.push(' ');
        block.push_str(&self.paint(DIM, &stamp));
        block.push('\n');

        for attr in &entry.attrs {
            block.push_str(&format!(
                "\t- {}{} : {}\n",
                prefix,
                sanitize(&attr.key),
                sanitize(&attr.value.to_string())
            ));
        }

        block.push_str(&self.paint(color, CLOSING_BANNER));
        block.push('\n');
        block
    }

    // Not subject to colored's process-wide NO_COLOR/CLICOLOR control.
    fn paint(&self, color: Color, text: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
        } else {
            text.to_string()
        }
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn banner(level: LogLevel) -> String {
    format!("{}{}{}", BANNER_FILL, level.to_str(), BANNER_TAIL)
}

/// `"group."` for a non-empty group, `""` otherwise
pub fn group_prefix(group: Option<&str>) -> String {
    match group {
        Some(name) if !name.is_empty() => format!("{}.", name),
        _ => String::new(),
    }
}

/// Escape line breaks so a value cannot break out of its line
fn sanitize(text: &str) -> String {
    if !text.contains('\n') && !text.contains('\r') {
        return text.to_string();
    }
    text.replace('\n', "\\n").replace('\r', "\\r")
}

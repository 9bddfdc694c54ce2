//! ANSI styling primitives
//!
//! Escape-sequence helpers for color, background, bold and cursor
//! positioning. Multi-line text is styled line by line so that each line
//! carries its own SGR prefix and reset, which keeps styles intact when the
//! lines are later positioned independently.
//!
//! Reference: ECMA-48 / xterm control sequences (SGR = `CSI ... m`,
//! CUP = `CSI row ; col H`).

use crate::core::{Color, Style};

/// Reset all attributes
pub const RESET: &str = "\x1b[0m";

/// Erase the whole display
pub const CLEAR: &str = "\x1b[2J";

/// SGR sequence selecting a foreground color
pub fn fg(color: Color) -> String {
    sgr(color.fg_params().unwrap_or_else(|| "39".to_string()))
}

/// SGR sequence selecting a background color
pub fn bg(color: Color) -> String {
    sgr(color.bg_params().unwrap_or_else(|| "49".to_string()))
}

fn sgr(params: String) -> String {
    format!("\x1b[{}m", params)
}

/// Cursor position sequence. Columns and rows are 1-based, as the
/// terminal expects them.
pub fn cursor_to(col: usize, row: usize) -> String {
    format!("\x1b[{};{}H", row, col)
}

/// Apply `transform` to every line of `text` and rejoin with newlines.
/// The closure receives the line index and the line.
pub fn apply_transform<F>(text: &str, mut transform: F) -> String
where
    F: FnMut(usize, &str) -> String,
{
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| transform(idx, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every line of `text` bold
pub fn bold(text: &str) -> String {
    styled(text, Color::Default, Style::BOLD)
}

/// Render every line of `text` in a foreground color
pub fn color(text: &str, color: Color) -> String {
    apply_transform(text, |_, line| format!("{}{}{}", fg(color), line, RESET))
}

/// Render every line of `text` on a background color
pub fn background(text: &str, color: Color) -> String {
    apply_transform(text, |_, line| format!("{}{}{}", bg(color), line, RESET))
}

/// Render every line of `text` with a foreground color and style
pub fn styled(text: &str, color: Color, style: Style) -> String {
    let mut params: Vec<String> = style
        .sgr_codes()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    params.extend(color.fg_params());

    if params.is_empty() {
        return text.to_string();
    }

    let prefix = format!("\x1b[{}m", params.join(";"));
    apply_transform(text, |_, line| format!("{}{}{}", prefix, line, RESET))
}

/// Place every line of `text` at column `col`, starting at row `row` and
/// moving down one row per line (1-based). Lines are positioned absolutely,
/// so no newlines are emitted between them.
pub fn move_to(text: &str, col: usize, row: usize) -> String {
    text.split('\n')
        .enumerate()
        .map(|(idx, line)| format!("{}{}", cursor_to(col, row + idx), line))
        .collect()
}

/// Strip CSI escape sequences, leaving the printable text
pub fn strip(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameters and intermediates run until a final byte in @..~
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    out
}

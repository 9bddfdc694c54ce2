//! Bordered text boxes
//!
//! A [`TextBox`] frames a block of text in a fixed-size border. Content is
//! written into the box through [`std::fmt::Write`] and laid out when the
//! box is rendered: each line is padded or truncated to the interior width,
//! measured in display cells rather than bytes.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::size::{Extent, WindowSize};

/// Border glyphs in the order horizontal, vertical, top-left, top-right,
/// bottom-left, bottom-right
pub const DEFAULT_BORDER: &str = "- │ ┌ ┐ └ ┘";

/// Error type for border specifications
#[derive(Debug, thiserror::Error)]
pub enum BorderError {
    #[error("Border needs six single-cell glyphs, got {0:?}")]
    InvalidBorder(String),
}

/// The six glyphs that make up a box border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Border {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl Border {
    /// Box-drawing characters throughout
    pub const LIGHT: Border = Border {
        horizontal: '─',
        vertical: '│',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    /// Plain ASCII
    pub const ASCII: Border = Border {
        horizontal: '-',
        vertical: '|',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };

    /// Parse a whitespace-separated glyph list such as [`DEFAULT_BORDER`]
    pub fn parse(spec: &str) -> Result<Self, BorderError> {
        let invalid = || BorderError::InvalidBorder(spec.to_string());

        let glyphs = spec
            .split_whitespace()
            .map(|part| {
                let mut chars = part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.width() == Some(1) => Ok(c),
                    _ => Err(invalid()),
                }
            })
            .collect::<Result<Vec<char>, _>>()?;

        match glyphs[..] {
            [horizontal, vertical, top_left, top_right, bottom_left, bottom_right] => Ok(Border {
                horizontal,
                vertical,
                top_left,
                top_right,
                bottom_left,
                bottom_right,
            }),
            _ => Err(invalid()),
        }
    }

    fn edge(&self, left: char, right: char, width: usize) -> String {
        let mut line = String::with_capacity(width * 3);
        if width == 0 {
            return line;
        }
        line.push(left);
        if width > 1 {
            line.extend(std::iter::repeat(self.horizontal).take(width - 2));
            line.push(right);
        }
        line
    }

    /// A row between the top and bottom edges, `inner` already fitted to
    /// `width - 2` cells
    fn side(&self, inner: &str, width: usize) -> String {
        match width {
            0 => String::new(),
            1 => self.vertical.to_string(),
            _ => format!("{}{}{}", self.vertical, inner, self.vertical),
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Border {
            horizontal: '-',
            ..Border::LIGHT
        }
    }
}

impl TryFrom<String> for Border {
    type Error = BorderError;

    fn try_from(spec: String) -> Result<Self, Self::Error> {
        Border::parse(&spec)
    }
}

impl From<Border> for String {
    fn from(b: Border) -> Self {
        b.to_string()
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.horizontal,
            self.vertical,
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right
        )
    }
}

/// Split `s` into single characters and CSI escape sequences, each paired
/// with the number of cells it occupies. Escape sequences occupy none.
fn segments(s: &str) -> impl Iterator<Item = (&str, usize)> + '_ {
    let mut rest = s;
    std::iter::from_fn(move || {
        let c = rest.chars().next()?;
        let len = if c == '\x1b' && rest[1..].starts_with('[') {
            rest[2..]
                .find(|f: char| ('@'..='~').contains(&f))
                .map_or(rest.len(), |i| i + 3)
        } else {
            c.len_utf8()
        };

        let (seg, tail) = rest.split_at(len);
        rest = tail;
        let width = if len == c.len_utf8() {
            c.width().unwrap_or(0)
        } else {
            0
        };
        Some((seg, width))
    })
}

/// Display width of a string in terminal cells
pub fn display_width(s: &str) -> usize {
    segments(s).map(|(_, w)| w).sum()
}

/// Pad `line` with spaces or truncate it so it occupies exactly `width`
/// cells. A wide character that would straddle the edge is dropped and the
/// gap filled with a space. Escape sequences are kept as they are.
pub fn fit_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;

    for (seg, w) in segments(line) {
        if used + w > width {
            break;
        }
        out.push_str(seg);
        used += w;
    }

    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// A fixed-size bordered text box
#[derive(Debug, Clone)]
pub struct TextBox {
    buf: String,

    pub width: usize,
    pub height: usize,

    pub padding_x: usize,
    pub padding_y: usize,

    pub border: Border,
}

impl TextBox {
    /// Create an empty box with the default border, one column of
    /// horizontal padding and no vertical padding
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            buf: String::new(),
            width,
            height,
            padding_x: 1,
            padding_y: 0,
            border: Border::default(),
        }
    }

    /// Create a box sized in cells or as a percentage of the window
    pub fn sized(width: Extent, height: Extent, size: WindowSize) -> Self {
        Self::new(
            width.resolve(usize::from(size.cols)),
            height.resolve(usize::from(size.rows)),
        )
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }

    pub fn with_padding(mut self, padding_x: usize, padding_y: usize) -> Self {
        self.padding_x = padding_x;
        self.padding_y = padding_y;
        self
    }

    /// Replace the content
    pub fn with_content(mut self, text: &str) -> Self {
        self.buf = text.to_string();
        self
    }

    /// Content written so far
    pub fn content(&self) -> &str {
        &self.buf
    }

    /// Horizontal padding actually applied; it shrinks when the box is too
    /// narrow to hold it
    fn effective_padding_x(&self) -> usize {
        self.padding_x.min(self.width.saturating_sub(2) / 2)
    }

    /// Interior width available to content lines
    pub fn content_width(&self) -> usize {
        self.width
            .saturating_sub((self.effective_padding_x() + 1) * 2)
    }

    /// Number of content lines that fit inside the border and padding
    pub fn content_height(&self) -> usize {
        self.height.saturating_sub((self.padding_y + 1) * 2)
    }

    /// Lay out the box. Produces exactly `height` lines joined by `\n`.
    pub fn render(&self) -> String {
        let b = &self.border;
        let lines: Vec<&str> = self.buf.split('\n').collect();

        let pad = " ".repeat(self.effective_padding_x());
        let offset = self.padding_y + 1;
        let content_width = self.content_width();

        let mut out = Vec::with_capacity(self.height);
        for y in 0..self.height {
            let line = if y == 0 {
                b.edge(b.top_left, b.top_right, self.width)
            } else if y == self.height - 1 {
                b.edge(b.bottom_left, b.bottom_right, self.width)
            } else if y <= self.padding_y || y >= (self.height - 1).saturating_sub(self.padding_y) {
                b.side(&" ".repeat(self.width.saturating_sub(2)), self.width)
            } else {
                let text = lines.get(y - offset).copied().unwrap_or("");
                let inner = format!("{}{}{}", pad, fit_width(text, content_width), pad);
                b.side(&inner, self.width)
            };
            out.push(line);
        }

        out.join("\n")
    }
}

impl fmt::Write for TextBox {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl fmt::Display for TextBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    #[test]
    fn test_box() {
        let expected = "┌--------┐\n│ hello  │\n│ world  │\n│ test   │\n└--------┘";

        let mut tb = TextBox::new(10, 5);
        write!(tb, "hello\nworld\ntest").unwrap();

        assert_eq!(tb.render(), expected);
    }

    #[test]
    fn test_box_truncates_long_lines() {
        let expected = "┌--------┐\n│ hello  │\n│ world  │\n│ test   │\n└--------┘";

        let mut tb = TextBox::new(10, 5);
        write!(tb, "hello i'm very long string\nworld\ntest").unwrap();

        assert_eq!(tb.render(), expected);
    }

    #[test]
    fn test_box_with_unicode() {
        let expected = "┌--------┐\n│ hell☺  │\n│ w©rld  │\n│ test✓✓ │\n└--------┘";

        let tb = TextBox::new(10, 5).with_content("hell☺\nw©rld\ntest✓✓");

        assert_eq!(tb.render(), expected);
    }

    #[test]
    fn test_box_vertical_padding() {
        let tb = TextBox::new(8, 5).with_padding(1, 1).with_content("ab\ncd");
        let rendered = tb.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "│      │");
        assert_eq!(lines[2], "│ ab   │");
        assert_eq!(lines[3], "│      │");
        assert_eq!(tb.content_height(), 1);
    }

    #[test]
    fn test_box_missing_lines_are_blank() {
        let tb = TextBox::new(6, 4).with_content("x");
        assert_eq!(tb.render(), "┌----┐\n│ x  │\n│    │\n└----┘");
    }

    #[test]
    fn test_box_custom_border() {
        let tb = TextBox::new(5, 3)
            .with_border(Border::ASCII)
            .with_content("hi");
        assert_eq!(tb.render(), "+---+\n| h |\n+---+");
    }

    #[test]
    fn test_box_display_matches_render() {
        let tb = TextBox::new(7, 3).with_content("abc");
        assert_eq!(tb.to_string(), tb.render());
    }

    #[test]
    fn test_border_parse_default() {
        let border = Border::parse(DEFAULT_BORDER).unwrap();
        assert_eq!(border, Border::default());
        assert_eq!(border.to_string(), DEFAULT_BORDER);
    }

    #[test]
    fn test_border_parse_rejects_bad_specs() {
        assert!(Border::parse("- | + +").is_err());
        assert!(Border::parse("-- | + + + +").is_err());
        assert!(Border::parse("").is_err());
    }

    #[test]
    fn test_border_serde_as_string() {
        let json = serde_json::to_string(&Border::ASCII).unwrap();
        assert_eq!(json, "\"- | + + + +\"");
        let back: Border = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Border::ASCII);
    }

    #[test]
    fn test_border_parse_rejects_wide_glyphs() {
        assert!(Border::parse("- │ ┌ ┐ └ 中").is_err());
        assert!(Border::parse("- \t + + + +").is_err());
        assert!(serde_json::from_str::<Border>("\"中 | + + + +\"").is_err());
    }

    #[test]
    fn test_narrow_box_keeps_exact_width() {
        for width in 0..7 {
            for padding_x in 0..4 {
                let tb = TextBox::new(width, 4)
                    .with_padding(padding_x, 0)
                    .with_content("hello\nworld");
                let rendered = tb.render();
                let lines: Vec<&str> = rendered.split('\n').collect();

                assert_eq!(lines.len(), 4);
                for line in lines {
                    assert_eq!(display_width(line), width, "{}x4 pad {}: {:?}", width, padding_x, line);
                }
            }
        }
        assert_eq!(TextBox::new(3, 3).with_content("ab").render(), "┌-┐\n│a│\n└-┘");
    }

    #[test]
    fn test_sized_box() {
        let size = WindowSize::new(80, 24);
        let tb = TextBox::sized(Extent::Percent(50), Extent::Cells(5), size);

        assert_eq!((tb.width, tb.height), (40, 5));
        assert_eq!(tb.padding_x, 1);
        assert_eq!(tb.render().lines().count(), 5);
    }

    #[test]
    fn test_fit_width() {
        assert_eq!(fit_width("ab", 4), "ab  ");
        assert_eq!(fit_width("abcdef", 4), "abcd");
        assert_eq!(fit_width("中文字", 5), "中文 ");
        assert_eq!(display_width("中a"), 3);
    }

    #[test]
    fn test_escapes_take_no_room() {
        let red = "\x1b[31mab\x1b[0m";
        assert_eq!(display_width(red), 2);
        assert_eq!(fit_width(red, 3), "\x1b[31mab\x1b[0m ");

        let tb = TextBox::new(6, 3).with_content(red);
        assert_eq!(crate::style::strip(&tb.render()), "┌----┐\n│ ab │\n└----┘");
    }
}

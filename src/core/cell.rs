//! Canvas Cell
//!
//! Represents a single cell of a character canvas: one glyph plus the
//! color and style it is printed with.

use serde::{Deserialize, Serialize};

/// A single cell in a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The glyph in this cell. Blank cells hold a space.
    pub glyph: char,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text style attributes
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            fg: Color::Default,
            bg: Color::Default,
            style: Style::default(),
        }
    }
}

impl Cell {
    /// Create a new cell with a single glyph
    pub fn new(glyph: char) -> Self {
        Self {
            glyph,
            ..Default::default()
        }
    }

    /// Create a new cell with glyph and foreground color
    pub fn colored(glyph: char, fg: Color) -> Self {
        Self {
            glyph,
            fg,
            ..Default::default()
        }
    }

    /// Check if this cell is blank (a space with no attributes)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether printing this cell needs any SGR attributes
    pub fn is_plain(&self) -> bool {
        self.fg == Color::Default && self.bg == Color::Default && self.style == Style::default()
    }

    /// Clear the cell to default state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Color representation supporting indexed and RGB colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    /// Default terminal color (foreground or background)
    #[default]
    Default,
    /// 256-color palette index (0-7 standard, 8-15 bright)
    Indexed(u8),
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Standard ANSI colors (0-7)
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    /// Bright ANSI colors (8-15)
    pub const BRIGHT_BLACK: Color = Color::Indexed(8);
    pub const BRIGHT_RED: Color = Color::Indexed(9);
    pub const BRIGHT_GREEN: Color = Color::Indexed(10);
    pub const BRIGHT_YELLOW: Color = Color::Indexed(11);
    pub const BRIGHT_BLUE: Color = Color::Indexed(12);
    pub const BRIGHT_MAGENTA: Color = Color::Indexed(13);
    pub const BRIGHT_CYAN: Color = Color::Indexed(14);
    pub const BRIGHT_WHITE: Color = Color::Indexed(15);

    /// SGR parameters selecting this color as foreground
    /// (`None` for the default color).
    pub fn fg_params(&self) -> Option<String> {
        self.params(30, 90, 38)
    }

    /// SGR parameters selecting this color as background
    pub fn bg_params(&self) -> Option<String> {
        self.params(40, 100, 48)
    }

    fn params(&self, base: u8, bright_base: u8, extended: u8) -> Option<String> {
        match *self {
            Color::Default => None,
            Color::Indexed(i @ 0..=7) => Some((base + i).to_string()),
            Color::Indexed(i @ 8..=15) => Some((bright_base + i - 8).to_string()),
            Color::Indexed(i) => Some(format!("{};5;{}", extended, i)),
            Color::Rgb(r, g, b) => Some(format!("{};2;{};{};{}", extended, r, g, b)),
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub bold: bool,
    pub faint: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink: bool,
    pub inverse: bool,
    pub strikethrough: bool,
}

impl Style {
    /// Bold-only style
    pub const BOLD: Style = Style {
        bold: true,
        faint: false,
        italic: false,
        underline: false,
        blink: false,
        inverse: false,
        strikethrough: false,
    };

    /// SGR parameter codes for the enabled attributes, in code order
    pub fn sgr_codes(&self) -> Vec<u8> {
        [
            (self.bold, 1),
            (self.faint, 2),
            (self.italic, 3),
            (self.underline, 4),
            (self.blink, 5),
            (self.inverse, 7),
            (self.strikethrough, 9),
        ]
        .into_iter()
        .filter_map(|(on, code)| on.then_some(code))
        .collect()
    }
}

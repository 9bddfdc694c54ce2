//! Line charts
//!
//! Renders the numeric columns of a [`DataTable`] as ASCII line plots on a
//! fixed-size character grid:
//!
//! - `data`: the column/row table charts read from
//! - `scale`: per-axis domains and value → cell mapping
//! - `raster`: polyline drawing onto a canvas
//!
//! A [`Chart`] holds only configuration. Every draw call scales, rasterizes
//! and serializes from scratch, so drawing the same table twice yields the
//! same text.

mod data;
mod raster;
mod scale;

pub use data::{DataTable, TableError};
pub use raster::{draw_line, Rasterizer, SeriesStyle, SkippedPoint};
pub use scale::{AxisScaler, ScaleDomain, ScaleMode, Scales, XAxis, DEGENERATE_EPSILON};

use unicode_width::UnicodeWidthChar;

use crate::core::{Canvas, Color};
use crate::layout::{Border, TextBox};

/// Glyphs cycled through for successive series
pub const DEFAULT_GLYPHS: [char; 8] = ['*', '+', 'o', 'x', '#', '@', '%', '&'];

/// Colors cycled through for successive series when drawing with ANSI
pub const DEFAULT_COLORS: [Color; 6] = [
    Color::RED,
    Color::GREEN,
    Color::YELLOW,
    Color::BLUE,
    Color::MAGENTA,
    Color::CYAN,
];

/// Smallest accepted chart width and height
pub const MIN_EXTENT: usize = 2;

/// Error type for chart configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    #[error("Chart must be at least {min}x{min} cells, got {width}x{height}", min = MIN_EXTENT)]
    InvalidDimensions { width: usize, height: usize },

    #[error("Glyph {0:?} does not occupy exactly one cell")]
    InvalidGlyph(char),

    #[error("At least one series glyph is required")]
    EmptyGlyphs,
}

/// A rendered chart together with the points that could not be drawn
#[derive(Debug, Clone)]
pub struct Rendering {
    pub canvas: Canvas,
    pub skipped: Vec<SkippedPoint>,
}

impl Rendering {
    /// Plain text: `height` lines of `width` cells
    pub fn text(&self) -> String {
        self.canvas.to_text()
    }

    /// Text with per-series ANSI colors
    pub fn ansi(&self) -> String {
        self.canvas.to_ansi()
    }
}

/// Line chart configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    width: usize,
    height: usize,
    pub mode: ScaleMode,
    pub x_axis: XAxis,
    styles: Vec<SeriesStyle>,
}

impl Chart {
    /// Create a chart of `width` × `height` cells with absolute scaling and
    /// the default series glyphs and colors
    pub fn new(width: usize, height: usize) -> Self {
        let styles = DEFAULT_GLYPHS
            .iter()
            .zip(DEFAULT_COLORS.iter().cycle())
            .map(|(&glyph, &color)| SeriesStyle::new(glyph, color))
            .collect();

        Self {
            width,
            height,
            mode: ScaleMode::default(),
            x_axis: XAxis::default(),
            styles,
        }
    }

    pub fn with_mode(mut self, mode: ScaleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_x_axis(mut self, x_axis: XAxis) -> Self {
        self.x_axis = x_axis;
        self
    }

    /// Replace the series glyphs, keeping the color cycle. Every glyph
    /// must be exactly one cell wide.
    pub fn with_glyphs(mut self, glyphs: &[char]) -> Result<Self, ChartError> {
        if glyphs.is_empty() {
            return Err(ChartError::EmptyGlyphs);
        }
        if let Some(&bad) = glyphs.iter().find(|c| c.width() != Some(1)) {
            return Err(ChartError::InvalidGlyph(bad));
        }

        self.styles = glyphs
            .iter()
            .zip(DEFAULT_COLORS.iter().cycle())
            .map(|(&glyph, &color)| SeriesStyle::new(glyph, color))
            .collect();
        Ok(self)
    }

    /// Replace the series colors, keeping the glyphs
    pub fn with_colors(mut self, colors: &[Color]) -> Self {
        if colors.is_empty() {
            return self;
        }
        for (style, &color) in self.styles.iter_mut().zip(colors.iter().cycle()) {
            style.color = color;
        }
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn styles(&self) -> &[SeriesStyle] {
        &self.styles
    }

    fn validate(&self) -> Result<(), ChartError> {
        if self.width < MIN_EXTENT || self.height < MIN_EXTENT {
            return Err(ChartError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Scale and rasterize `table`, keeping the canvas and skipped points
    pub fn render(&self, table: &DataTable) -> Result<Rendering, ChartError> {
        self.validate()?;

        let series = self.x_axis.series_columns(table);
        let scales = AxisScaler::new(self.mode, self.x_axis).scale(table, &series);

        let mut canvas = Canvas::new(self.width, self.height);
        let skipped =
            Rasterizer::new(table, &scales, self.x_axis).rasterize(&mut canvas, &series, &self.styles);

        if !skipped.is_empty() {
            log::warn!(
                "Skipped {} non-finite point(s) while drawing {}x{} chart",
                skipped.len(),
                self.width,
                self.height
            );
        }

        Ok(Rendering { canvas, skipped })
    }

    /// Draw `table` as plain text: exactly `height` lines of `width` cells,
    /// joined by newlines. An empty table draws a blank chart.
    pub fn draw(&self, table: &DataTable) -> Result<String, ChartError> {
        Ok(self.render(table)?.text())
    }

    /// Like [`Chart::draw`], also returning the points left out
    pub fn draw_report(&self, table: &DataTable) -> Result<(String, Vec<SkippedPoint>), ChartError> {
        let rendering = self.render(table)?;
        Ok((rendering.text(), rendering.skipped))
    }

    /// Like [`Chart::draw`] with each series in its ANSI color
    pub fn draw_ansi(&self, table: &DataTable) -> Result<String, ChartError> {
        Ok(self.render(table)?.ansi())
    }

    /// Draw `table` framed in a border, one column of padding on each side
    pub fn draw_framed(&self, table: &DataTable, border: Border) -> Result<String, ChartError> {
        let text = self.draw(table)?;
        let frame = TextBox::new(self.width + 4, self.height + 2)
            .with_border(border)
            .with_content(&text);
        Ok(frame.render())
    }
}

//! Character Canvas
//!
//! A fixed-size 2D grid of cells that chart rendering paints into before it
//! is serialized to text. Row 0 is the top row.

use serde::{Deserialize, Serialize};

use super::cell::Cell;

/// A row of cells in the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// The cells in this row
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cols: usize) -> Self {
        Self {
            cells: vec![Cell::default(); cols],
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Plain text of the row, always exactly one char per cell
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.glyph).collect()
    }

    /// Text of the row with SGR sequences around styled runs
    pub fn ansi_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len());
        let mut current: Option<&Cell> = None;

        for cell in &self.cells {
            let changed = match current {
                Some(prev) => prev.fg != cell.fg || prev.bg != cell.bg || prev.style != cell.style,
                None => !cell.is_plain(),
            };
            if changed {
                if current.is_some_and(|prev| !prev.is_plain()) {
                    out.push_str(crate::style::RESET);
                }
                if !cell.is_plain() {
                    out.push_str(&sgr(cell));
                }
            }
            current = Some(cell);
            out.push(cell.glyph);
        }

        if current.is_some_and(|c| !c.is_plain()) {
            out.push_str(crate::style::RESET);
        }
        out
    }
}

/// Build the SGR escape that selects a cell's attributes
fn sgr(cell: &Cell) -> String {
    let mut params: Vec<String> = cell
        .style
        .sgr_codes()
        .into_iter()
        .map(|c| c.to_string())
        .collect();
    params.extend(cell.fg.fg_params());
    params.extend(cell.bg.bg_params());
    format!("\x1b[{}m", params.join(";"))
}

/// A fixed-size grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// The rows in the canvas
    rows: Vec<Row>,
    /// Number of columns
    width: usize,
    /// Number of rows
    height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: (0..height).map(|_| Row::new(width)).collect(),
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get a reference to a cell
    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Get a mutable reference to a cell
    pub fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    /// Get a reference to a row
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// Write a cell. Positions outside the canvas are clipped; returns
    /// whether the write landed.
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) -> bool {
        match self.cell_mut(col, row) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Signed variant of [`Canvas::set`] for line walkers that may step
    /// past the left or top edge.
    pub fn set_signed(&mut self, col: isize, row: isize, cell: Cell) -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        self.set(col as usize, row as usize, cell)
    }

    /// Clear the entire canvas
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    /// Number of non-blank cells
    pub fn filled(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.iter().filter(|c| !c.is_empty()).count())
            .sum()
    }

    /// Serialize row by row into `height` newline-joined lines of exactly
    /// `width` cells each.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(Row::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Like [`Canvas::to_text`] but with ANSI colors and styles
    pub fn to_ansi(&self) -> String {
        self.rows
            .iter()
            .map(Row::ansi_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Series rasterization
//!
//! Turns scaled series into polylines on a [`Canvas`]. Each row of a series
//! maps to one cell; consecutive cells are joined with Bresenham lines so a
//! series reads as a continuous curve. Series are painted in index order,
//! so where two lines cross the later series wins the cell.

use serde::{Deserialize, Serialize};

use super::data::DataTable;
use super::scale::{Scales, XAxis};
use crate::core::{Canvas, Cell, Color};

/// Glyph and color a series is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub glyph: char,
    pub color: Color,
}

impl SeriesStyle {
    pub fn new(glyph: char, color: Color) -> Self {
        Self { glyph, color }
    }

    fn cell(&self) -> Cell {
        Cell::colored(self.glyph, self.color)
    }
}

/// A value that could not be placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkippedPoint {
    /// Row of the table
    pub row: usize,
    /// Column holding the offending value
    pub column: usize,
    pub value: f64,
}

/// Paints series of a table onto a canvas
#[derive(Debug)]
pub struct Rasterizer<'a> {
    table: &'a DataTable,
    scales: &'a Scales,
    x_axis: XAxis,
}

impl<'a> Rasterizer<'a> {
    pub fn new(table: &'a DataTable, scales: &'a Scales, x_axis: XAxis) -> Self {
        Self {
            table,
            scales,
            x_axis,
        }
    }

    /// Draw every series in `series` (column indices, aligned with
    /// `scales.y`). Style `i % styles.len()` is used for series `i`.
    /// Returns the points that had to be left out; with no series nothing
    /// is drawn and nothing is reported.
    pub fn rasterize(
        &self,
        canvas: &mut Canvas,
        series: &[usize],
        styles: &[SeriesStyle],
    ) -> Vec<SkippedPoint> {
        let mut skipped = Vec::new();
        if series.is_empty() {
            return skipped;
        }
        let columns = self.x_columns(canvas.width(), &mut skipped);

        for (idx, &col) in series.iter().enumerate() {
            let style = match styles.len() {
                0 => SeriesStyle::new('*', Color::Default),
                n => styles[idx % n],
            };
            let domain = self.scales.y.get(idx).copied().flatten();
            let height = canvas.height();
            let mut prev: Option<(usize, usize)> = None;

            for (row, x) in columns.iter().enumerate() {
                let value = self.table.value(row, col).unwrap_or(f64::NAN);
                let y = domain.and_then(|d| d.position(value, height));

                let point = match (x, y) {
                    (Some(x), Some(y)) => Some((*x, height - 1 - y)),
                    (_, None) => {
                        if !value.is_finite() {
                            skipped.push(SkippedPoint {
                                row,
                                column: col,
                                value,
                            });
                        }
                        None
                    }
                    // Missing x was already reported
                    (None, Some(_)) => None,
                };

                match (prev, point) {
                    (Some(from), Some(to)) => draw_line(canvas, from, to, style.cell()),
                    (None, Some((x, y))) => {
                        canvas.set(x, y, style.cell());
                    }
                    _ => {}
                }
                prev = point;
            }
        }

        for p in &skipped {
            log::debug!(
                "Skipped non-finite value {} at row {}, column {}",
                p.value,
                p.row,
                p.column
            );
        }
        skipped
    }

    /// Canvas column of every row, reporting rows whose x is unusable
    fn x_columns(&self, width: usize, skipped: &mut Vec<SkippedPoint>) -> Vec<Option<usize>> {
        (0..self.table.row_count())
            .map(|row| {
                let x = self.x_axis.value(self.table, row).unwrap_or(f64::NAN);
                let col = self.scales.x.and_then(|d| d.position(x, width));
                if col.is_none() {
                    skipped.push(SkippedPoint {
                        row,
                        column: self.x_axis.column().unwrap_or(0),
                        value: x,
                    });
                }
                col
            })
            .collect()
    }
}

/// Draw a line between two cells using Bresenham's algorithm. Both end
/// points are painted.
pub fn draw_line(canvas: &mut Canvas, from: (usize, usize), to: (usize, usize), cell: Cell) {
    let (x0, y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx: isize = if x0 < x1 { 1 } else { -1 };
    let sy: isize = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_signed(x, y, cell);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

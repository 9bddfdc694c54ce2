//! Fixed-width tables
//!
//! Text is written into a [`Table`] with tab-separated cells and
//! newline-separated rows, the same way one would feed an elastic-tabstop
//! writer. Rendering aligns every column to its widest cell.

use std::fmt;

use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{CellAlignment, ColumnConstraint, ContentArrangement, Width};

/// Column alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// A borderless, column-aligned text table
#[derive(Debug, Clone)]
pub struct Table {
    buf: String,
    header: Option<Vec<String>>,

    /// Minimum width of every column, in cells
    pub min_width: u16,
    /// Spaces between columns
    pub padding: u16,
    pub align: Align,
    /// Draw a full UTF-8 grid instead of plain aligned columns
    pub bordered: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            buf: String::new(),
            header: None,
            min_width: 0,
            padding: 1,
            align: Align::Left,
            bordered: false,
        }
    }
}

impl Table {
    pub fn new(min_width: u16, padding: u16) -> Self {
        Self {
            min_width,
            padding,
            ..Self::default()
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.bordered = true;
        self
    }

    pub fn set_header<S: Into<String>>(&mut self, header: impl IntoIterator<Item = S>) {
        self.header = Some(header.into_iter().map(Into::into).collect());
    }

    /// Append one row of cells
    pub fn add_row<S: AsRef<str>>(&mut self, cells: impl IntoIterator<Item = S>) {
        let row: Vec<String> = cells.into_iter().map(|c| c.as_ref().to_string()).collect();
        self.buf.push_str(&row.join("\t"));
        self.buf.push('\n');
    }

    /// Rows parsed from the buffered text
    pub fn rows(&self) -> Vec<Vec<&str>> {
        let text = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        if text.is_empty() {
            return Vec::new();
        }
        text.split('\n').map(|line| line.split('\t').collect()).collect()
    }

    /// Lay out the table. Trailing whitespace is trimmed from every line.
    pub fn render(&self) -> String {
        let mut table = comfy_table::Table::new();
        table
            .load_preset(if self.bordered { UTF8_FULL } else { NOTHING })
            .set_content_arrangement(ContentArrangement::Disabled);

        if let Some(header) = &self.header {
            table.set_header(header.clone());
        }
        for row in self.rows() {
            table.add_row(row);
        }

        let alignment = match self.align {
            Align::Left => CellAlignment::Left,
            Align::Right => CellAlignment::Right,
        };
        let (left, right) = if self.bordered {
            (1, 1)
        } else {
            (0, self.padding)
        };
        for column in table.column_iter_mut() {
            column.set_padding((left, right));
            column.set_cell_alignment(alignment);
            if self.min_width > 0 {
                column.set_constraint(ColumnConstraint::LowerBoundary(Width::Fixed(
                    self.min_width,
                )));
            }
        }

        table
            .to_string()
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Write for Table {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    fn column_start(line: &str, needle: &str) -> usize {
        line.find(needle).unwrap()
    }

    #[test]
    fn test_rows_from_tabbed_text() {
        let mut table = Table::default();
        write!(table, "a\tb\nc\td\n").unwrap();

        assert_eq!(table.rows(), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::default();
        assert!(table.rows().is_empty());
        assert_eq!(table.render().trim(), "");
    }

    #[test]
    fn test_columns_are_aligned() {
        let mut table = Table::default();
        table.add_row(["name", "value"]);
        table.add_row(["x", "1"]);
        table.add_row(["longer-name", "22"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        let col = column_start(lines[0], "value");
        assert_eq!(column_start(lines[1], "1"), col);
        assert_eq!(column_start(lines[2], "22"), col);
        assert!(col > "longer-name".len());
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let mut table = Table::new(0, 2);
        table.add_row(["a", "b"]);
        table.add_row(["ccc", "d"]);

        for line in table.render().lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn test_header_rendered_first() {
        let mut table = Table::default();
        table.set_header(["col"]);
        table.add_row(["v"]);

        let rendered = table.render();
        assert!(rendered.lines().next().unwrap().contains("col"));
        assert!(rendered.contains('v'));
    }

    #[test]
    fn test_bordered_table_draws_grid() {
        let mut table = Table::default().bordered();
        table.add_row(["a", "b"]);

        let rendered = table.render();
        assert!(rendered.contains('│'));
        assert!(rendered.contains('a'));
    }
}

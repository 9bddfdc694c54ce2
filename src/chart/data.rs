//! Data Table
//!
//! Column-labeled, row-oriented numeric storage that charts read from.
//! Columns and rows are append-only; every row holds exactly one value per
//! column.

use serde::{Deserialize, Serialize};

/// Error type for table construction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("Column {0:?} already exists")]
    DuplicateColumn(String),

    #[error("Row has {found} values but the table has {expected} columns")]
    RowWidthMismatch { expected: usize, found: usize },

    #[error("Cannot add column {0:?} after rows have been added")]
    ColumnsFrozen(String),
}

/// A table of named numeric columns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Unchecked serialized form; rebuilt through the checked constructors
#[derive(Deserialize)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawTable> for DataTable {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let mut table = DataTable::with_columns(raw.columns)?;
        for row in raw.rows {
            table.add_row(row)?;
        }
        Ok(table)
    }
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with the given columns
    pub fn with_columns<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, TableError> {
        let mut table = Self::new();
        for name in names {
            table.add_column(name)?;
        }
        Ok(table)
    }

    /// Append a column. Names must be unique, and the column set is fixed
    /// once the first row is in.
    pub fn add_column(&mut self, name: impl Into<String>) -> Result<(), TableError> {
        let name = name.into();
        if !self.rows.is_empty() {
            return Err(TableError::ColumnsFrozen(name));
        }
        if self.columns.contains(&name) {
            return Err(TableError::DuplicateColumn(name));
        }
        self.columns.push(name);
        Ok(())
    }

    /// Append a row. The table is left untouched when the value count does
    /// not match the column count.
    pub fn add_row(&mut self, values: impl Into<Vec<f64>>) -> Result<(), TableError> {
        let values = values.into();
        if values.len() != self.columns.len() {
            return Err(TableError::RowWidthMismatch {
                expected: self.columns.len(),
                found: values.len(),
            });
        }
        self.rows.push(values);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column name by index
    pub fn column(&self, idx: usize) -> Option<&str> {
        self.columns.get(idx).map(String::as_str)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index of a named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell value by (row, column)
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Values of one column in row order
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |r| r.get(col).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_data_table() {
        let mut data = DataTable::new();

        data.add_column("Gender").unwrap();
        data.add_column("Age").unwrap();

        assert_eq!(data.column_count(), 2);
        assert_eq!(data.column(1), Some("Age"));

        data.add_row([1.0, 5.0]).unwrap();
        data.add_row([0.0, 4.0]).unwrap();

        assert_eq!(data.row_count(), 2);
        assert_eq!(data.value(1, 0), Some(0.0));
        assert_eq!(data.value(1, 1), Some(4.0));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut data = DataTable::with_columns(["x", "y"]).unwrap();

        assert_eq!(
            data.add_column("x"),
            Err(TableError::DuplicateColumn("x".to_string()))
        );
        assert_eq!(data.column_count(), 2);
    }

    #[test]
    fn test_row_width_mismatch_leaves_table_unchanged() {
        let mut data = DataTable::with_columns(["x", "y"]).unwrap();
        data.add_row([1.0, 2.0]).unwrap();

        assert_eq!(
            data.add_row([1.0]),
            Err(TableError::RowWidthMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            data.add_row(vec![1.0, 2.0, 3.0]),
            Err(TableError::RowWidthMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(data.row_count(), 1);
    }

    #[test]
    fn test_columns_frozen_after_rows() {
        let mut data = DataTable::with_columns(["x"]).unwrap();
        data.add_row([1.0]).unwrap();

        assert!(matches!(
            data.add_column("y"),
            Err(TableError::ColumnsFrozen(_))
        ));
        assert_eq!(data.column_count(), 1);
    }

    #[test]
    fn test_row_into_empty_table() {
        let mut data = DataTable::new();
        assert!(data.add_row(Vec::new()).is_ok());
        assert!(data.add_row([1.0]).is_err());
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let table: DataTable =
            serde_json::from_str(r#"{"columns":["x","y"],"rows":[[1.0,2.0],[3.0,4.0]]}"#).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(1, 1), Some(4.0));

        let duplicate = serde_json::from_str::<DataTable>(r#"{"columns":["x","x"],"rows":[]}"#);
        assert!(duplicate.unwrap_err().to_string().contains("already exists"));

        let ragged =
            serde_json::from_str::<DataTable>(r#"{"columns":["x","y"],"rows":[[1.0],[1.0,2.0,3.0]]}"#);
        assert!(ragged.unwrap_err().to_string().contains("2 columns"));
    }

    #[test]
    fn test_serialize_then_load() {
        let mut table = DataTable::with_columns(["t", "v"]).unwrap();
        table.add_row([0.0, 1.5]).unwrap();

        let json = serde_json::to_string(&table).unwrap();
        let back: DataTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_accessors() {
        let mut data = DataTable::with_columns(["t", "v"]).unwrap();
        data.add_row([0.0, 10.0]).unwrap();
        data.add_row([1.0, 20.0]).unwrap();

        assert_eq!(data.column_index("v"), Some(1));
        assert_eq!(data.column_index("missing"), None);
        assert_eq!(data.row(1), Some(&[1.0, 20.0][..]));
        assert_eq!(data.column_values(1).collect::<Vec<_>>(), vec![10.0, 20.0]);
        assert_eq!(data.value(5, 0), None);
        assert_eq!(data.column(9), None);
    }
}

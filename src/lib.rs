//! termkit
//!
//! Text-mode rendering helpers for dashboards and CLI status displays.
//!
//! - `chart`: ASCII line charts drawn from a numeric [`chart::DataTable`]
//! - `core`: cells and the fixed-size canvas charts render into
//! - `layout`: bordered, padded text boxes
//! - `table`: column-aligned tables
//! - `style`: ANSI color, bold and cursor helpers
//! - `screen`: buffered output flushed to the terminal
//! - `size`: terminal size queries and percentage extents
//! - `config`: JSON configuration for the `termplot` binary

pub mod chart;
pub mod config;
pub mod core;
pub mod layout;
pub mod screen;
pub mod size;
pub mod style;
pub mod table;

pub use chart::{Chart, ChartError, DataTable, ScaleMode, TableError, XAxis};
pub use layout::{Border, TextBox};
pub use screen::Screen;

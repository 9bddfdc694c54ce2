//! termplot
//!
//! Plots the numeric columns of a text table as an ASCII line chart.
//! The first input line names the columns; every following line holds one
//! row of numbers separated by commas, tabs or spaces.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use termkit::chart::{DataTable, ScaleMode, TableError, XAxis};
use termkit::config::Config;
use termkit::screen::Screen;
use termkit::size::{Extent, SizeSource, TtySize, WindowSize};

/// CLI arguments for termplot
#[derive(Parser, Debug, Clone)]
#[command(name = "termplot")]
#[command(version)]
#[command(about = "Plot numeric columns as an ASCII line chart", long_about = None)]
struct CliArgs {
    /// Input file (defaults to stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Chart width in cells, or NN% of the terminal width
    #[arg(short = 'W', long, value_name = "WIDTH")]
    width: Option<Extent>,

    /// Chart height in cells, or NN% of the terminal height
    #[arg(short = 'H', long, value_name = "HEIGHT")]
    height: Option<Extent>,

    /// Vertical scaling (absolute, relative, independent)
    #[arg(short, long, value_name = "MODE")]
    mode: Option<ScaleMode>,

    /// Use the row number as x and plot every column
    #[arg(long)]
    row_index: bool,

    /// Draw a frame around the chart
    #[arg(short, long)]
    frame: bool,

    /// Frame glyphs: horizontal, vertical and four corners
    #[arg(long, value_name = "GLYPHS")]
    border: Option<String>,

    /// Color each series
    #[arg(long)]
    color: bool,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Error type for table input
#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error("Input is empty")]
    Empty,

    #[error("Line {line}: {value:?} is not a number")]
    NotANumber { line: usize, value: String },

    #[error("Line {line}: {source}")]
    Table {
        line: usize,
        #[source]
        source: TableError,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    apply_args(&mut config, &args)?;

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    let table = parse_table(&text)?;
    info!(
        "Read {} rows of {} columns",
        table.row_count(),
        table.column_count()
    );

    let size = TtySize.window_size_or(WindowSize::default());
    let chart = config.chart(size)?;
    let plot = if config.chart.color {
        chart.draw_ansi(&table)?
    } else {
        chart.draw(&table)?
    };

    let mut screen = Screen::new();
    screen.println(config.frame.wrap(&plot, chart.width(), chart.height()));
    screen.flush_to(&mut io::stdout().lock(), usize::MAX)?;

    Ok(())
}

/// Command line flags take precedence over the config file
fn apply_args(config: &mut Config, args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(width) = args.width {
        config.chart.width = width;
    }
    if let Some(height) = args.height {
        config.chart.height = height;
    }
    if let Some(mode) = args.mode {
        config.chart.mode = mode;
    }
    if args.row_index {
        config.chart.x_axis = XAxis::RowIndex;
    }
    if args.color {
        config.chart.color = true;
    }
    if args.frame {
        config.frame.enabled = true;
    }
    if let Some(border) = &args.border {
        config.set_border(border)?;
        config.frame.enabled = true;
    }
    Ok(())
}

fn at_line(line: usize) -> impl Fn(TableError) -> InputError {
    move |source| InputError::Table { line, source }
}

fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c == ',' || c == '\t' || c == ' ')
        .map(str::trim)
        .filter(|field| !field.is_empty())
}

/// Parse a header line of column names followed by rows of numbers.
/// Blank lines and lines starting with `#` are skipped.
fn parse_table(text: &str) -> Result<DataTable, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (header_line, header) = lines.next().ok_or(InputError::Empty)?;
    let mut table = DataTable::with_columns(split_fields(header)).map_err(at_line(header_line))?;

    for (line, row) in lines {
        let values = split_fields(row)
            .map(|field| {
                field.parse::<f64>().map_err(|_| InputError::NotANumber {
                    line,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        table.add_row(values).map_err(at_line(line))?;
    }

    Ok(table)
}

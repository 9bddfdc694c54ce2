//! Axis scaling
//!
//! Computes the numeric domain of each axis and maps values linearly onto
//! canvas positions.
//!
//! The vertical domain depends on the [`ScaleMode`]:
//! - `Absolute`: one domain shared by all series, stretched to include zero
//! - `Relative`: one domain shared by all series, spanning their joint range
//! - `Independent`: one domain per series, spanning that series' own range
//!
//! The horizontal domain is always computed on its own from the x source.
//! Non-finite values never contribute to a domain.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::data::DataTable;

/// Relative half-width used to widen a domain whose min equals its max
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// How the vertical axis is shared between series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMode {
    /// Shared scale anchored at zero
    #[default]
    Absolute,
    /// Shared scale over the joint min/max of all series
    Relative,
    /// Every series normalized to its own min/max
    Independent,
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "absolute" | "default" => Ok(ScaleMode::Absolute),
            "relative" => Ok(ScaleMode::Relative),
            "independent" => Ok(ScaleMode::Independent),
            other => Err(format!(
                "unknown scale mode {:?} (expected absolute, relative or independent)",
                other
            )),
        }
    }
}

/// Where horizontal positions come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    /// Column 0 holds x; the remaining columns are series
    #[default]
    FirstColumn,
    /// The row index is x; every column is a series
    RowIndex,
}

impl XAxis {
    /// Column indices plotted as series
    pub fn series_columns(&self, table: &DataTable) -> Vec<usize> {
        let first = match self {
            XAxis::FirstColumn => 1,
            XAxis::RowIndex => 0,
        };
        (first..table.column_count()).collect()
    }

    /// The x column, if x comes from a column
    pub fn column(&self) -> Option<usize> {
        match self {
            XAxis::FirstColumn => Some(0),
            XAxis::RowIndex => None,
        }
    }

    /// x value of a row
    pub fn value(&self, table: &DataTable, row: usize) -> Option<f64> {
        match self {
            XAxis::FirstColumn => table.value(row, 0),
            XAxis::RowIndex => (row < table.row_count()).then_some(row as f64),
        }
    }
}

/// A (min, max) range of one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleDomain {
    pub min: f64,
    pub max: f64,
}

impl ScaleDomain {
    /// Create a domain; the bounds are reordered if given backwards
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Domain of a single value
    pub fn point(v: f64) -> Self {
        Self { min: v, max: v }
    }

    /// Smallest domain containing every finite value, if there is one
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values
            .into_iter()
            .fold(None, |acc: Option<Self>, v| Self::extend(acc, v))
    }

    /// Grow `acc` to contain `v`. Non-finite values are ignored.
    pub fn extend(acc: Option<Self>, v: f64) -> Option<Self> {
        if !v.is_finite() {
            return acc;
        }
        Some(match acc {
            Some(d) => Self {
                min: d.min.min(v),
                max: d.max.max(v),
            },
            None => Self::point(v),
        })
    }

    /// Smallest domain containing both
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Stretch to contain zero
    pub fn with_zero(&self) -> Self {
        Self {
            min: self.min.min(0.0),
            max: self.max.max(0.0),
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    /// Widen a degenerate domain symmetrically so it has a usable span.
    /// A flat series then maps onto the middle of the axis. Bounds saturate
    /// at the finite `f64` range.
    pub fn widened(&self) -> Self {
        if !self.is_degenerate() {
            return *self;
        }
        let eps = DEGENERATE_EPSILON * self.min.abs().max(1.0);
        Self {
            min: (self.min - eps).max(f64::MIN),
            max: (self.max + eps).min(f64::MAX),
        }
    }

    /// Map a value onto `0..extent`:
    /// `floor((v - min) / (max - min) * (extent - 1))`, clamped.
    /// Returns `None` for non-finite values or an empty extent.
    pub fn position(&self, value: f64, extent: usize) -> Option<usize> {
        if !value.is_finite() || extent == 0 {
            return None;
        }
        let last = (extent - 1) as f64;
        let domain = self.widened();

        // A span wider than f64::MAX overflows; halve both terms instead
        let (offset, span) = if domain.span().is_finite() {
            (value - domain.min, domain.span())
        } else {
            (value / 2.0 - domain.min / 2.0, domain.max / 2.0 - domain.min / 2.0)
        };
        let pos = (offset / span * last).floor();
        Some(pos.clamp(0.0, last) as usize)
    }
}

/// Computed domains for one render
#[derive(Debug, Clone, PartialEq)]
pub struct Scales {
    /// Horizontal domain, `None` when no row has a finite x
    pub x: Option<ScaleDomain>,
    /// Vertical domain per series, in the order the series were given.
    /// `None` for a series without any finite value.
    pub y: Vec<Option<ScaleDomain>>,
}

/// Computes [`Scales`] for a table
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisScaler {
    pub mode: ScaleMode,
    pub x_axis: XAxis,
}

impl AxisScaler {
    pub fn new(mode: ScaleMode, x_axis: XAxis) -> Self {
        Self { mode, x_axis }
    }

    /// Scan the table once and derive the x domain plus the y domain of
    /// every series column in `series`.
    pub fn scale(&self, table: &DataTable, series: &[usize]) -> Scales {
        let mut x = None;
        let mut per_series: Vec<Option<ScaleDomain>> = vec![None; series.len()];

        for (row_idx, row) in table.rows().iter().enumerate() {
            if let Some(xv) = self.x_axis.value(table, row_idx) {
                x = ScaleDomain::extend(x, xv);
            }
            for (slot, &col) in per_series.iter_mut().zip(series) {
                if let Some(&v) = row.get(col) {
                    *slot = ScaleDomain::extend(*slot, v);
                }
            }
        }

        let y = match self.mode {
            ScaleMode::Independent => per_series.iter().map(|d| d.map(|d| d.widened())).collect(),
            ScaleMode::Relative | ScaleMode::Absolute => {
                let joint = per_series
                    .iter()
                    .flatten()
                    .copied()
                    .reduce(|a, b| a.union(&b))
                    .map(|d| match self.mode {
                        ScaleMode::Absolute => d.with_zero(),
                        _ => d,
                    })
                    .map(|d| d.widened());
                // Series without finite values stay without a domain
                per_series.iter().map(|d| d.and(joint)).collect()
            }
        };

        let scales = Scales {
            x: x.map(|d| d.widened()),
            y,
        };
        log::debug!(
            "Scaled {} series over {} rows ({:?}): x={:?}",
            series.len(),
            table.row_count(),
            self.mode,
            scales.x
        );
        scales
    }
}

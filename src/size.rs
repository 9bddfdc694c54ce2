//! Terminal window size
//!
//! The size of the controlling terminal is only ever a sizing hint for
//! callers (e.g. "make the chart 80% of the terminal width"); nothing in the
//! chart or box renderers queries it. Access goes through [`SizeSource`] so
//! callers and tests can substitute a fixed size.

use serde::{Deserialize, Serialize};

/// Window size in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Number of rows (characters)
    pub rows: u16,
    /// Number of columns (characters)
    pub cols: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl From<libc::winsize> for WindowSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
        }
    }
}

/// Error type for size queries
#[derive(Debug, thiserror::Error)]
pub enum SizeError {
    #[error("Failed to get window size: {0}")]
    Ioctl(#[source] nix::errno::Errno),

    #[error("Terminal reported an empty window size")]
    Unavailable,
}

/// Something that can report the current terminal size
pub trait SizeSource {
    fn window_size(&self) -> Result<WindowSize, SizeError>;

    /// The reported size, or `fallback` when it cannot be determined
    fn window_size_or(&self, fallback: WindowSize) -> WindowSize {
        match self.window_size() {
            Ok(size) => size,
            Err(e) => {
                log::debug!("Using fallback window size {:?}: {}", fallback, e);
                fallback
            }
        }
    }
}

/// Queries the terminal attached to standard input
#[derive(Debug, Clone, Copy, Default)]
pub struct TtySize;

impl SizeSource for TtySize {
    fn window_size(&self) -> Result<WindowSize, SizeError> {
        get_window_size(libc::STDIN_FILENO)
    }
}

/// A constant size, for tests and non-interactive output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSize(pub WindowSize);

impl SizeSource for FixedSize {
    fn window_size(&self) -> Result<WindowSize, SizeError> {
        Ok(self.0)
    }
}

/// Get the window size from a terminal file descriptor
pub fn get_window_size(fd: libc::c_int) -> Result<WindowSize, SizeError> {
    let mut winsize = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ is a valid ioctl for getting window size and
    // `winsize` outlives the call
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut winsize) };

    if result < 0 {
        return Err(SizeError::Ioctl(nix::errno::Errno::last()));
    }
    if winsize.ws_col == 0 || winsize.ws_row == 0 {
        return Err(SizeError::Unavailable);
    }
    Ok(winsize.into())
}

/// A length along one screen axis: a fixed number of cells or a
/// percentage of the terminal's extent on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extent {
    Cells(usize),
    Percent(u8),
}

impl Extent {
    /// Resolve against the total number of cells on the axis.
    /// Percentages above 100 are capped at 100.
    pub fn resolve(self, total: usize) -> usize {
        match self {
            Extent::Cells(n) => n,
            Extent::Percent(p) => total * usize::from(p.min(100)) / 100,
        }
    }
}

impl std::str::FromStr for Extent {
    type Err = std::num::ParseIntError;

    /// Parses `"40"` as cells and `"50%"` as a percentage
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().strip_suffix('%') {
            Some(pct) => Ok(Extent::Percent(pct.trim().parse()?)),
            None => Ok(Extent::Cells(s.trim().parse()?)),
        }
    }
}

impl From<usize> for Extent {
    fn from(cells: usize) -> Self {
        Extent::Cells(cells)
    }
}

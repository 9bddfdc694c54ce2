//! Screen output buffer
//!
//! An append-only text buffer that print helpers write into and that is
//! flushed to a real output sink in one go. Each caller owns its own
//! `Screen`; there is no process-wide buffer.

use std::fmt::{self, Write as _};
use std::io;

use crate::size::{Extent, WindowSize};
use crate::style;

/// Buffered terminal output
#[derive(Debug, Clone, Default)]
pub struct Screen {
    buf: String,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text
    pub fn print(&mut self, text: impl fmt::Display) {
        // Writing into a String cannot fail
        let _ = write!(self.buf, "{}", text);
    }

    /// Append text followed by a newline
    pub fn println(&mut self, text: impl fmt::Display) {
        let _ = writeln!(self.buf, "{}", text);
    }

    /// Append pre-formatted arguments (use with `format_args!`)
    pub fn printf(&mut self, args: fmt::Arguments<'_>) {
        let _ = self.buf.write_fmt(args);
    }

    /// Append a clear-display sequence
    pub fn clear(&mut self) {
        self.buf.push_str(style::CLEAR);
    }

    /// Append a cursor move to the 1-based `col`, `row`
    pub fn move_cursor(&mut self, col: usize, row: usize) {
        self.buf.push_str(&style::cursor_to(col, row));
    }

    /// Number of completed lines currently buffered
    pub fn current_height(&self) -> usize {
        self.buf.matches('\n').count()
    }

    /// Buffered text
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the buffer without writing it
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Resolve a position on this screen. `x` and `y` may be percentages of
    /// the window size; a missing `y` means the line after the last buffered
    /// one, so text lands below what was already printed.
    pub fn resolve_xy(&self, x: Extent, y: Option<Extent>, size: WindowSize) -> (usize, usize) {
        let x = x.resolve(usize::from(size.cols));
        let y = match y {
            Some(y) => y.resolve(usize::from(size.rows)),
            None => self.current_height() + 1,
        };
        (x, y)
    }

    /// Write the buffered lines to `out`, stopping after `max_rows` lines,
    /// then empty the buffer. Returns the number of lines written.
    pub fn flush_to<W: io::Write>(&mut self, out: &mut W, max_rows: usize) -> io::Result<usize> {
        let mut written = 0;

        if !self.buf.is_empty() {
            let text = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
            for line in text.split('\n').take(max_rows) {
                writeln!(out, "{}", line)?;
                written += 1;
            }
        }
        out.flush()?;

        log::debug!("Flushed {} screen lines", written);
        self.buf.clear();
        Ok(written)
    }
}

impl fmt::Write for Screen {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    #[test]
    fn test_print_helpers_append() {
        let mut screen = Screen::new();
        screen.print("a");
        screen.println("b");
        screen.printf(format_args!("{}-{}", 1, 2));

        assert_eq!(screen.as_str(), "ab\n1-2");
        assert_eq!(screen.current_height(), 1);
    }

    #[test]
    fn test_fmt_write() {
        let mut screen = Screen::new();
        write!(screen, "x={}", 5).unwrap();
        assert_eq!(screen.as_str(), "x=5");
    }

    #[test]
    fn test_cursor_and_clear_sequences() {
        let mut screen = Screen::new();
        screen.clear();
        screen.move_cursor(3, 7);
        assert_eq!(screen.as_str(), "\x1b[2J\x1b[7;3H");
    }

    #[test]
    fn test_flush_writes_and_resets() {
        let mut screen = Screen::new();
        screen.println("one");
        screen.print("two");

        let mut out = Vec::new();
        let written = screen.flush_to(&mut out, 10).unwrap();

        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "one\ntwo\n");
        assert!(screen.is_empty());
    }

    #[test]
    fn test_flush_truncates_to_rows() {
        let mut screen = Screen::new();
        for i in 0..10 {
            screen.println(i);
        }

        let mut out = Vec::new();
        let written = screen.flush_to(&mut out, 3).unwrap();

        assert_eq!(written, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "0\n1\n2\n");
    }

    #[test]
    fn test_flush_trailing_newline() {
        let mut screen = Screen::new();
        screen.println("only");

        let mut out = Vec::new();
        assert_eq!(screen.flush_to(&mut out, 5).unwrap(), 1);
        assert_eq!(String::from_utf8(out).unwrap(), "only\n");
    }

    #[test]
    fn test_flush_empty_screen() {
        let mut screen = Screen::new();
        let mut out = Vec::new();
        assert_eq!(screen.flush_to(&mut out, 5).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolve_xy() {
        let mut screen = Screen::new();
        screen.println("first");
        screen.println("second");
        let size = WindowSize::new(100, 40);

        assert_eq!(
            screen.resolve_xy(Extent::Percent(50), Some(Extent::Percent(25)), size),
            (50, 10)
        );
        assert_eq!(screen.resolve_xy(Extent::Cells(4), None, size), (4, 3));
    }
}

//! Canvas Core Module
//!
//! Platform-independent character grid used as a drawing surface:
//! - Cell representation with color and style attributes
//! - Fixed-size canvas with clipped writes
//! - Plain-text and ANSI serialization
//!
//! Rendering into a canvas is deterministic: the same sequence of writes
//! always produces the same text.

mod canvas;
mod cell;

pub use canvas::{Canvas, Row};
pub use cell::{Cell, Color, Style};

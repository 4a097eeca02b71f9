//! Python code generation
//!
//! Syntax-directed translation of the AST into Python source text:
//! - [`render`]: per-node rendering rules for statements and expressions
//! - [`loops`]: counted `for` loops, as `range()` loops or `while` loops
//! - [`generator`]: whole-program output (header line, final newline)
//!
//! Rendering is a pure function of a node and an [`Indent`]; composite nodes
//! pass `indent.deeper()` to their children. No rendering step can fail: the
//! parser rejects everything that could not be rendered faithfully.

pub mod generator;
pub mod loops;
pub mod render;

use std::fmt;
use std::num::NonZeroUsize;

pub use generator::Generator;

use crate::config::DEFAULT_INDENT_WIDTH;

/// Indentation of a rendered line: a nesting depth and the number of spaces
/// per level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    depth: usize,
    width: usize,
}

impl Indent {
    /// Top-level indentation with `width` spaces per nesting level
    pub fn new(width: NonZeroUsize) -> Self {
        Indent {
            depth: 0,
            width: width.get(),
        }
    }

    /// One level further in
    pub fn deeper(self) -> Self {
        Indent {
            depth: self.depth + 1,
            ..self
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::new(DEFAULT_INDENT_WIDTH)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:1$}", "", self.depth * self.width)
    }
}

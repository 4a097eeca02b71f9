//! # Introduction
//!
//! cpptopy translates a small, single-file subset of C++ into equivalent
//! Python 3 source text.  The translation is syntax-directed: every AST node
//! renders itself, given the indentation it sits at.
//!
//! ## Translation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Generator → Python text
//! ```
//!
//! 1. [`parser`] — tokenises the source, builds an AST, and rejects
//!    constructs outside the subset with a located error.
//! 2. [`codegen`] — renders the AST as Python; counted `for` loops become
//!    `range()` loops where that keeps the meaning.
//! 3. [`driver`] — [`translate`] in memory and [`translate_file`] on disk.
//!
//! ## Supported C++ subset
//!
//! Types: `int`, `float`, `double`, `char`, `bool`, `string`.
//! Statements: declarations, assignments (including `+=`, `++` and friends),
//! `if/else`, `while`, `for`, `cout <<`, `cin >>`, a final `return`.
//! Program shape: optional `#include` lines, `using namespace std;`, global
//! variables, and one `int main()`.

pub mod codegen;
pub mod config;
pub mod driver;
pub mod error;
pub mod parser;

pub use config::TranslatorConfig;
pub use driver::{translate, translate_file};
pub use error::{Result, TranslateError};

//! C++ subset source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser struct, error types and helpers (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported Subset
//!
//! - Types: `int`, `float`, `double`, `char`, `bool`, `string`
//! - Statements: declarations, assignments, `if`/`else`, `while`, counted `for`,
//!   `cout << ...`, `cin >> x`, a trailing `return`
//! - Expressions: arithmetic, relational, logical, unary minus and not
//! - Exactly one argument-less `int main()`; global variable declarations
//! - No preprocessor (`#include` lines are skipped)
//! - No classes, templates, pointers, arrays, or other functions: these are
//!   recognized and rejected as unsupported constructs
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{ParseError, Parser, SyntaxError, UnsupportedConstructError};

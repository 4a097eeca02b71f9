//! Translator configuration

use std::num::NonZeroUsize;

/// First line of every translated file unless disabled
pub const HEADER: &str = "# Translated from C++ (subset) to Python";

/// Spaces per nesting level unless configured otherwise
pub const DEFAULT_INDENT_WIDTH: NonZeroUsize = match NonZeroUsize::new(4) {
    Some(width) => width,
    None => panic!("indent width must be non-zero"),
};

/// Output settings shared by the library API and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Spaces per nesting level of the generated Python. Zero would put
    /// nested suites at column 0, which Python rejects.
    pub indent_width: NonZeroUsize,
    /// Whether to start the output with [`HEADER`]
    pub emit_header: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            indent_width: DEFAULT_INDENT_WIDTH,
            emit_header: true,
        }
    }
}

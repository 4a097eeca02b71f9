//! Whole-program output

use super::Indent;
use crate::config::{TranslatorConfig, HEADER};
use crate::parser::ast::Program;

/// Turns a parsed [`Program`] into the text of a Python file
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: TranslatorConfig,
}

impl Generator {
    pub fn new(config: TranslatorConfig) -> Self {
        Generator { config }
    }

    /// Header line (if enabled), the program body, and one final newline
    pub fn generate(&self, program: &Program) -> String {
        let body = program.render(Indent::new(self.config.indent_width));

        let mut out = String::new();
        if self.config.emit_header {
            out.push_str(HEADER);
            out.push('\n');
        }
        out.push_str(&body);
        out.push('\n');
        out
    }
}

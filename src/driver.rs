//! Translation entry points
//!
//! ```text
//! Source → Lexer → Parser → AST → Generator → Python text
//! ```
//!
//! [`translate`] runs the whole pipeline in memory; [`translate_file`] wraps
//! it with file I/O. The output file only appears once translation has fully
//! succeeded.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::codegen::Generator;
use crate::config::TranslatorConfig;
use crate::error::{Result, TranslateError};
use crate::parser::Parser;

/// Translate C++ subset source text into Python source text
pub fn translate(source: &str, config: &TranslatorConfig) -> Result<String> {
    let mut parser = Parser::new(source)?;
    let program = parser.parse_program()?;
    Ok(Generator::new(*config).generate(&program))
}

/// Translate the file at `input` and write the result to `output`
pub fn translate_file(input: &Path, output: &Path, config: &TranslatorConfig) -> Result<()> {
    tracing::info!(input = %input.display(), "reading source");
    let source = fs::read_to_string(input).map_err(|e| TranslateError::io(input, e))?;

    let python = translate(&source, config)?;

    write_atomically(output, &python)?;
    tracing::info!(output = %output.display(), bytes = python.len(), "wrote translation");
    Ok(())
}

/// Write through a sibling temporary file renamed over `path`
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let temp = temp_path(path);
    tracing::debug!(temp = %temp.display(), "writing temporary file");

    if let Err(e) = fs::write(&temp, contents) {
        let _ = fs::remove_file(&temp);
        return Err(TranslateError::io(&temp, e));
    }
    if let Err(e) = fs::rename(&temp, path) {
        let _ = fs::remove_file(&temp);
        return Err(TranslateError::io(path, e));
    }
    Ok(())
}

/// `dir/.name.tmp` next to `dir/name`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_else(|| "output".as_ref()));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("out/prog.py")),
            PathBuf::from("out/.prog.py.tmp")
        );
        assert_eq!(temp_path(Path::new("prog.py")), PathBuf::from(".prog.py.tmp"));
    }

    #[test]
    fn test_translate_reports_parse_errors() {
        let err = translate("int main() { int x = ; }", &TranslatorConfig::default()).unwrap_err();
        assert!(matches!(err, TranslateError::Parse(_)));
        assert!(err.location().is_some());
    }
}

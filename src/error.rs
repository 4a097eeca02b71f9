//! Error types for the translator

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ast::SourceLocation;
use crate::parser::ParseError;

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TranslateError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TranslateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Source position of the error, when it comes from the source text
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            TranslateError::Parse(e) => Some(e.location()),
            TranslateError::Io { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;

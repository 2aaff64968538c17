use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid UTF-8 in file {file}")]
    InvalidUtf8 { file: PathBuf },
    #[error("Failed to load Go grammar: {0}")]
    Language(String),
    #[error("Parser produced no syntax tree")]
    NoTree,
    #[error("Syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

#[derive(Debug, Error)]
pub enum VisError {
    #[error("Parse error in file {file}: {source}")]
    Parse { file: PathBuf, source: ParseError },

    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern { pattern: String, source: regex::Error },

    #[error("root struct {0} not found")]
    RootNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(String),
}

impl VisError {
    /// Process exit code for this error: 2 for configuration problems, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPattern { .. } | Self::Config(_) => 2,
            _ => 1,
        }
    }
}

//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a trace source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cannot open trace source {source_name}: {reason}")]
    SourceUnavailable {
        source_name: String,
        reason: std::io::Error,
    },

    #[error("Failed to read trace at line {line}: {reason}")]
    ReadFailed { line: usize, reason: std::io::Error },
}

/// Malformed `@` records
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing token {index} ({expected})")]
    MissingToken {
        line: usize,
        index: usize,
        expected: &'static str,
    },

    #[error("line {line}: unknown command token '{token}'")]
    UnknownCommand { line: usize, token: String },

    #[error("line {line}: token {index} '{token}' is not a bank index")]
    InvalidBank {
        line: usize,
        index: usize,
        token: String,
    },
}

impl ParseError {
    /// Line number the error refers to
    pub fn line(&self) -> usize {
        match self {
            Self::MissingToken { line, .. }
            | Self::UnknownCommand { line, .. }
            | Self::InvalidBank { line, .. } => *line,
        }
    }
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors from a full waterfall run
#[derive(Error, Debug)]
pub enum WaterfallError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Malformed record: {0}")]
    Malformed(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

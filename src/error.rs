//! Error type shared by the parser, aggregator and exporters.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure smartplot can report. All of them end the run.
#[derive(Debug, Error)]
pub enum SmartPlotError {
    #[error("cannot read input file {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: malformed timestamp {field:?} (expected YYYY-MM-DD HH:MM:SS)")]
    MalformedTimestamp { line: usize, field: String },

    #[error("line {line}: malformed attribute field {field:?}: {reason}")]
    MalformedAttributeField {
        line: usize,
        field: String,
        reason: String,
    },

    #[error("line {line}: not valid UTF-8 text")]
    InvalidEncoding {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("invalid run parameter: {0}")]
    InvalidRunParameter(String),

    #[error("failed to write {}: {reason}", path.display())]
    OutputWriteFailure { path: PathBuf, reason: String },
}

impl SmartPlotError {
    /// Line number the error points at, for parse failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            SmartPlotError::MalformedTimestamp { line, .. }
            | SmartPlotError::MalformedAttributeField { line, .. }
            | SmartPlotError::InvalidEncoding { line, .. } => Some(*line),
            _ => None,
        }
    }

    pub(crate) fn output(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SmartPlotError::OutputWriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SmartPlotError>;

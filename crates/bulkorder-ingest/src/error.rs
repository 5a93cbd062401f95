//! Ingestion error types.

use crate::record::RecordField;
use thiserror::Error;

/// Errors that abort ingestion. All of them are fatal to the run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A row failed validation
    #[error("Address #{row} has missing or invalid data: {content}")]
    InvalidRow {
        /// 1-based position of the row, header excluded
        row: usize,
        /// The raw row rendered as a JSON object in column order
        content: String,
        /// Fields that failed their predicate
        fields: Vec<RecordField>,
    },

    /// The file is not well-formed delimited text
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),

    /// The file could not be opened
    #[error("could not read {path}: {source}")]
    Io {
        /// Path of the input file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// Position of the rejected row, if the error is about a row.
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::InvalidRow { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// Result type alias for ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

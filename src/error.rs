//! Error types for the charger status pipeline.

use thiserror::Error;

/// Why a single row contributed nothing to the aggregation.
///
/// These never abort a batch; the pipeline counts them and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    /// A required field was absent or empty
    #[error("row is missing required field '{0}'")]
    IncompleteRow(&'static str),

    /// No accepted timestamp format matched
    #[error("invalid timestamp: '{0}'")]
    InvalidTimestamp(String),
}

impl RowError {
    /// Short, stable name used as a log field and skip-report key.
    pub fn kind(&self) -> &'static str {
        match self {
            RowError::IncompleteRow(_) => "incomplete_row",
            RowError::InvalidTimestamp(_) => "invalid_timestamp",
        }
    }
}

/// Batch-level failures. When one of these is returned no row was aggregated.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Header row lacks one or more required columns
    #[error("input is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The CSV reader could not read the header
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Reading or decompressing the source failed
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;

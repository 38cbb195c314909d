//! Table error types

use pipesheet_formula::{ErrorKind, FormulaError};
use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = std::result::Result<T, TableError>;

/// Errors that can occur while reading or rendering a table
#[derive(Debug, Error)]
pub enum TableError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Classification, parse or evaluation failure
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] pipesheet_core::Error),

    /// Grid handed to the renderer was not fully evaluated
    #[error("internal error: {0}")]
    Internal(&'static str),
}

impl TableError {
    /// Broad class of the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::Io(_) | TableError::Csv(_) => ErrorKind::Io,
            TableError::Formula(e) => e.kind(),
            TableError::Core(_) | TableError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Check if the error is a broken invariant rather than bad input
    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }
}

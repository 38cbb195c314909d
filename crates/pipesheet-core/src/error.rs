//! Error types for pipesheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pipesheet-core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("{0}")]
    InvalidAddress(&'static str),

    /// Cell count does not match the declared grid dimensions
    #[error("table of {rows}x{cols} needs {expected} cells, got {actual}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}

//! Source locations

use std::fmt;
use std::sync::Arc;

/// A position in the input table, printed as `file:row:col`.
///
/// Rows and columns are 1-based, columns count bytes from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Location {
    /// Path of the file the table was read from
    pub file: Arc<str>,
    /// Line number (1-based)
    pub row: usize,
    /// Byte column (1-based)
    pub col: usize,
}

impl Location {
    /// Create a new location
    pub fn new(file: Arc<str>, row: usize, col: usize) -> Self {
        Self { file, row, col }
    }

    /// The same line, `columns` bytes further right
    pub fn advanced(&self, columns: usize) -> Self {
        Self {
            file: self.file.clone(),
            row: self.row,
            col: self.col + columns,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.row, self.col)
    }
}

//! Prelude module - common imports for pipesheet users
//!
//! ```rust
//! use pipesheet::prelude::*;
//! ```

pub use crate::{
    // Calculation
    CalculationStats,
    // Cell types
    Cell,
    CellAddress,
    CellContent,
    CellValue,
    Direction,
    // Errors
    ErrorKind,
    FormulaError,
    // Main types
    Grid,
    Location,
    Spreadsheet,
    TableError,
    // I/O types
    TableReadOptions,
    TableReader,
    TableResult,
    TableWriteOptions,
    TableWriter,
};

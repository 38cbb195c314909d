//! # pipesheet
//!
//! Evaluate spreadsheet-style formulas written in plain, pipe-delimited text
//! tables.
//!
//! Every field of the table is one of:
//!
//! - a number (`3.5`, `-1e3`)
//! - a formula (`=A1 * (B1 - 2)`), with `+ - * /`, unary minus, parentheses
//!   and references made of a column letter and a 0-based row number
//! - a clone marker (`:<`, `:>`, `:^`, `:v`) that copies the neighbor in that
//!   direction, moving any references in a copied formula along with it
//! - anything else, kept as text
//!
//! ## Example
//!
//! ```rust
//! use pipesheet::prelude::*;
//!
//! let input = "\
//! price | qty | total
//! 2.5   | 4   | =A1*B1
//! 10    | 3   | :^
//! ";
//!
//! let mut sheet = Spreadsheet::from_str(input, "orders.txt").unwrap();
//! sheet.calculate().unwrap();
//!
//! assert_eq!(sheet.number(CellAddress::new(2, 2)), Some(30.0));
//! println!("{}", sheet.render(&TableWriteOptions::default()).unwrap());
//! ```

pub mod calculation;
pub mod prelude;

pub use calculation::{calculate, CalculationStats};

// Re-export core types
pub use pipesheet_core::{
    Cell, CellAddress, CellContent, CellValue, Direction, EvalStatus, ExprId, Grid, GridDump,
    Location, MAX_REFERENCE_COLS,
};

// Re-export formula types
pub use pipesheet_formula::{
    classify_cell, parse_formula, rebase_expr, ErrorKind, Evaluator, Expr, ExprArena, ExprKind,
    FormulaError, FormulaResult,
};

// Re-export I/O types
pub use pipesheet_table::{
    TableError, TableReadOptions, TableReader, TableResult, TableWriteOptions, TableWriter,
};

use std::io::Write;
use std::path::Path;

use tracing::debug;

/// A table together with the expressions its formulas point into
#[derive(Debug)]
pub struct Spreadsheet {
    grid: Grid,
    arena: ExprArena,
    /// Result of the first [`calculate`](Self::calculate) run
    outcome: Option<FormulaResult<CalculationStats>>,
}

impl Spreadsheet {
    /// Open a table file with the default `|` delimiter
    pub fn open<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        Self::open_with_options(path, &TableReadOptions::default())
    }

    /// Open a table file
    pub fn open_with_options<P: AsRef<Path>>(
        path: P,
        options: &TableReadOptions,
    ) -> TableResult<Self> {
        let (grid, arena) = TableReader::read_file(path, options)?;
        Ok(Self::from_parts(grid, arena))
    }

    /// Read a table from text; `file_name` only labels diagnostics
    pub fn from_str(content: &str, file_name: &str) -> TableResult<Self> {
        let (grid, arena) = TableReader::read_str(content, file_name, &TableReadOptions::default())?;
        Ok(Self::from_parts(grid, arena))
    }

    /// Wrap an already classified grid
    pub fn from_parts(grid: Grid, arena: ExprArena) -> Self {
        Self {
            grid,
            arena,
            outcome: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    /// Check if [`calculate`](Self::calculate) has completed successfully
    pub fn is_calculated(&self) -> bool {
        matches!(self.outcome, Some(Ok(_)))
    }

    /// Evaluate every cell
    ///
    /// Evaluation runs once. Later calls return the first run's statistics,
    /// or its error if it failed.
    pub fn calculate(&mut self) -> TableResult<CalculationStats> {
        if let Some(outcome) = &self.outcome {
            debug!("table already calculated");
            return outcome.clone().map_err(TableError::from);
        }

        let outcome = calculate(&mut self.grid, &mut self.arena);
        self.outcome = Some(outcome.clone());
        outcome.map_err(TableError::from)
    }

    /// Value of a cell, `None` outside the grid or for an unresolved clone
    pub fn value(&self, addr: CellAddress) -> Option<CellValue<'_>> {
        self.grid.get(addr)?.value()
    }

    /// Numeric value of a number or formula cell
    pub fn number(&self, addr: CellAddress) -> Option<f64> {
        self.grid.get(addr)?.as_number()
    }

    /// Formula cells with the root of their expression, in row-major order
    pub fn formulas(&self) -> impl Iterator<Item = (CellAddress, &Cell, ExprId)> {
        self.grid.iter().filter_map(|(addr, cell)| match cell.content() {
            CellContent::Expr { ast, .. } => Some((addr, cell, *ast)),
            _ => None,
        })
    }

    /// One `file:row:col: KIND` line per cell
    pub fn dump_cells(&self) -> GridDump<'_> {
        self.grid.dump()
    }

    /// Expression tree of every formula cell, each headed by its address
    /// and location
    pub fn dump_formulas(&self) -> String {
        let mut out = String::new();
        for (addr, cell, ast) in self.formulas() {
            out.push_str(&format!("{} ({}):\n", addr, cell.location()));
            out.push_str(&self.arena.dump(ast).to_string());
        }
        out
    }

    /// Render the table as aligned text
    pub fn render(&self, options: &TableWriteOptions) -> TableResult<String> {
        TableWriter::write_to_string(&self.grid, options)
    }

    /// Render the table to a writer
    pub fn write<W: Write>(&self, writer: W, options: &TableWriteOptions) -> TableResult<()> {
        TableWriter::write(&self.grid, writer, options)
    }
}

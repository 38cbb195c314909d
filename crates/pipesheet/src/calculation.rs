//! Table calculation
//!
//! Runs the evaluator over every cell of a grid and reports what it did.
//!
//! # Example
//!
//! ```rust
//! use pipesheet::calculation::calculate;
//! use pipesheet::{TableReader, TableReadOptions};
//!
//! let (mut grid, mut arena) =
//!     TableReader::read_str("1|=A0*2|:<", "inline", &TableReadOptions::default()).unwrap();
//! let stats = calculate(&mut grid, &mut arena).unwrap();
//!
//! assert_eq!(stats.formula_count, 1);
//! assert_eq!(stats.clones_resolved, 1);
//! ```

use pipesheet_core::{CellContent, Grid};
use pipesheet_formula::{Evaluator, ExprArena, FormulaResult};
use tracing::debug;

/// Statistics from a calculation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculationStats {
    /// Total number of cells in the grid
    pub cell_count: usize,
    /// Number of formula cells written in the input
    pub formula_count: usize,
    /// Number of clone cells resolved
    pub clones_resolved: usize,
    /// Expression nodes allocated while rebasing cloned formulas
    pub rebased_nodes: usize,
}

/// Evaluate every cell of `grid`, stopping at the first error
pub fn calculate(grid: &mut Grid, arena: &mut ExprArena) -> FormulaResult<CalculationStats> {
    let mut stats = CalculationStats {
        cell_count: grid.rows() * grid.cols(),
        ..Default::default()
    };

    for (_, cell) in grid.iter() {
        match cell.content() {
            CellContent::Expr { .. } => stats.formula_count += 1,
            CellContent::Clone(_) => stats.clones_resolved += 1,
            CellContent::Text(_) | CellContent::Number(_) => {}
        }
    }

    let nodes_before = arena.len();
    Evaluator::new(grid, arena).evaluate_all()?;
    stats.rebased_nodes = arena.len() - nodes_before;

    debug!(?stats, "calculation finished");
    Ok(stats)
}

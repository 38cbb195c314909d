//! Cell classification
//!
//! Decides what a raw, trimmed table field holds before anything is
//! evaluated:
//! - `=...` is a formula, parsed into the arena
//! - `:<`, `:>`, `:^`, `:v` clone the left/right/upper/lower neighbor
//! - anything that parses completely as a float is a number
//! - everything else is text

use pipesheet_core::{Cell, CellContent, Direction, Location};

use crate::ast::ExprArena;
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_formula;

/// Classify one field located at `location`
pub fn classify_cell(text: &str, location: Location, arena: &mut ExprArena) -> FormulaResult<Cell> {
    let content = if let Some(formula) = text.strip_prefix('=') {
        let ast = parse_formula(formula, location.advanced(1), arena)?;
        CellContent::Expr { ast, value: 0.0 }
    } else if let Some(marker) = text.strip_prefix(':') {
        let direction =
            Direction::from_marker(marker).ok_or_else(|| FormulaError::InvalidCloneDirection {
                location: location.clone(),
                marker: marker.to_string(),
            })?;
        CellContent::Clone(direction)
    } else if let Ok(n) = text.parse::<f64>() {
        CellContent::Number(n)
    } else {
        CellContent::Text(text.to_string())
    };

    Ok(Cell::new(content, location))
}

//! Cell content types

use std::fmt;

use super::address::Direction;
use crate::location::Location;

/// Index into the formula expression arena.
///
/// Cells refer to their parsed formula by handle, never by pointer, so the
/// arena can grow (and clone rebasing can append copies) without
/// invalidating any cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Per-cell evaluation guard
///
/// Moves forward only: `Unevaluated` → `InProgress` → `Evaluated`. Finding a
/// cell `InProgress` while resolving its dependencies means a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EvalStatus {
    #[default]
    Unevaluated,
    InProgress,
    Evaluated,
}

/// What a grid position holds
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CellContent {
    /// Plain text
    Text(String),

    /// Numeric literal
    Number(f64),

    /// Formula with its last computed value
    Expr {
        /// Root of the parsed formula
        ast: ExprId,
        /// Value computed by the evaluator (0.0 until evaluated)
        value: f64,
    },

    /// Adopt the neighbor's content in the given direction.
    ///
    /// Replaced in place by the neighbor's kind once evaluated.
    Clone(Direction),
}

/// The rendered value of an evaluated cell
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cell {
    content: CellContent,
    status: EvalStatus,
    location: Location,
}

impl Cell {
    /// Create an unevaluated cell
    pub fn new(content: CellContent, location: Location) -> Self {
        Self {
            content,
            status: EvalStatus::Unevaluated,
            location,
        }
    }

    /// An empty text cell, used to pad rows narrower than the table
    pub fn empty(location: Location) -> Self {
        Self::new(CellContent::Text(String::new()), location)
    }

    /// The cell's content
    pub fn content(&self) -> &CellContent {
        &self.content
    }

    /// Replace the cell's content (used when a clone adopts its neighbor)
    pub fn set_content(&mut self, content: CellContent) {
        self.content = content;
    }

    /// Current evaluation status
    pub fn status(&self) -> EvalStatus {
        self.status
    }

    /// Advance the evaluation status
    pub fn set_status(&mut self, status: EvalStatus) {
        debug_assert!(status >= self.status, "evaluation status never moves back");
        self.status = status;
    }

    /// Where the cell came from in the input
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Upper-case kind name used by diagnostic dumps
    pub fn kind_name(&self) -> &'static str {
        match self.content {
            CellContent::Text(_) => "TEXT",
            CellContent::Number(_) => "NUMBER",
            CellContent::Expr { .. } => "EXPR",
            CellContent::Clone(_) => "CLONE",
        }
    }

    /// Check if the cell is still an unresolved clone
    pub fn is_clone(&self) -> bool {
        matches!(self.content, CellContent::Clone(_))
    }

    /// Numeric value of a number or formula cell
    pub fn as_number(&self) -> Option<f64> {
        match self.content {
            CellContent::Number(n) => Some(n),
            CellContent::Expr { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Renderable value, `None` for an unresolved clone
    pub fn value(&self) -> Option<CellValue<'_>> {
        match &self.content {
            CellContent::Text(text) => Some(CellValue::Text(text)),
            CellContent::Number(n) => Some(CellValue::Number(*n)),
            CellContent::Expr { value, .. } => Some(CellValue::Number(*value)),
            CellContent::Clone(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn loc() -> Location {
        Location::new(Arc::from("t"), 1, 1)
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Cell::empty(loc()).kind_name(), "TEXT");
        assert_eq!(Cell::new(CellContent::Number(1.0), loc()).kind_name(), "NUMBER");
        let expr = CellContent::Expr {
            ast: ExprId::new(0),
            value: 0.0,
        };
        assert_eq!(Cell::new(expr, loc()).kind_name(), "EXPR");
        let clone = Cell::new(CellContent::Clone(Direction::Up), loc());
        assert_eq!(clone.kind_name(), "CLONE");
        assert!(clone.is_clone());
    }

    #[test]
    fn test_values() {
        let text = Cell::new(CellContent::Text("hi".into()), loc());
        assert_eq!(text.value(), Some(CellValue::Text("hi")));
        assert_eq!(text.as_number(), None);

        let expr = Cell::new(
            CellContent::Expr {
                ast: ExprId::new(3),
                value: 2.5,
            },
            loc(),
        );
        assert_eq!(expr.as_number(), Some(2.5));
        assert_eq!(expr.value(), Some(CellValue::Number(2.5)));

        let clone = Cell::new(CellContent::Clone(Direction::Left), loc());
        assert_eq!(clone.value(), None);
    }

    #[test]
    fn test_status_starts_unevaluated() {
        let mut cell = Cell::empty(loc());
        assert_eq!(cell.status(), EvalStatus::Unevaluated);
        cell.set_status(EvalStatus::InProgress);
        cell.set_status(EvalStatus::Evaluated);
        assert_eq!(cell.status(), EvalStatus::Evaluated);
    }
}

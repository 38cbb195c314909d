//! Formula Abstract Syntax Tree types
//!
//! Nodes live in an [`ExprArena`] and point at each other through
//! [`ExprId`] handles. The arena only grows; a node is never changed once
//! allocated, so every handle stays valid for the arena's lifetime.

use std::fmt;
use std::ops::Index;

use pipesheet_core::{CellAddress, ExprId, Location};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Apply the operator with IEEE-754 semantics (division by zero gives inf/NaN)
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOperator::Add => lhs + rhs,
            BinaryOperator::Subtract => lhs - rhs,
            BinaryOperator::Multiply => lhs * rhs,
            BinaryOperator::Divide => lhs / rhs,
        }
    }

    /// Name used by the expression dump
    pub fn dump_name(self) -> &'static str {
        match self {
            BinaryOperator::Add => "PLUS",
            BinaryOperator::Subtract => "MINUS",
            BinaryOperator::Multiply => "MULT",
            BinaryOperator::Divide => "DIV",
        }
    }
}

/// Formula expression node kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExprKind {
    /// Numeric literal
    Number(f64),
    /// Single cell reference
    CellRef(CellAddress),
    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// Unary minus
    Negate { operand: ExprId },
}

/// A node plus the location of the token that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Self { kind, location }
    }
}

/// Append-only store of expression nodes
#[derive(Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a node and return its handle
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        debug_assert!(self.exprs.len() < u32::MAX as usize);
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// Get a node, `None` for a handle from another arena
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    /// Number of nodes allocated so far
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Check if no node has been allocated
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Indented tree view of the expression rooted at `root`
    pub fn dump(&self, root: ExprId) -> ExprDump<'_> {
        ExprDump { arena: self, root }
    }
}

impl Index<ExprId> for ExprArena {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }
}

/// Display adapter returned by [`ExprArena::dump`]
pub struct ExprDump<'a> {
    arena: &'a ExprArena,
    root: ExprId,
}

impl ExprDump<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: ExprId, level: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = level * 2)?;

        match self.arena[id].kind {
            ExprKind::Number(n) => writeln!(f, "NUMBER: {n:.6}"),
            ExprKind::CellRef(addr) => writeln!(f, "CELL({}, {})", addr.row, addr.col),
            ExprKind::Negate { operand } => {
                writeln!(f, "UOP(MINUS):")?;
                self.write_node(f, operand, level + 1)
            }
            ExprKind::BinaryOp { op, lhs, rhs } => {
                writeln!(f, "BOP({}):", op.dump_name())?;
                self.write_node(f, lhs, level + 1)?;
                self.write_node(f, rhs, level + 1)
            }
        }
    }
}

impl fmt::Display for ExprDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn loc() -> Location {
        Location::new(Arc::from("a"), 1, 1)
    }

    #[test]
    fn test_handles_survive_growth() {
        let mut arena = ExprArena::new();
        let first = arena.alloc(Expr::new(ExprKind::Number(1.5), loc()));
        for i in 0..1000 {
            arena.alloc(Expr::new(ExprKind::Number(i as f64), loc()));
        }
        assert_eq!(arena[first].kind, ExprKind::Number(1.5));
        assert_eq!(arena.len(), 1001);
        assert!(arena.get(ExprId::new(5000)).is_none());
    }

    #[test]
    fn test_division_by_zero_is_ieee() {
        assert_eq!(BinaryOperator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOperator::Divide.apply(-1.0, 0.0), f64::NEG_INFINITY);
        assert!(BinaryOperator::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_dump() {
        let mut arena = ExprArena::new();
        let a = arena.alloc(Expr::new(ExprKind::CellRef(CellAddress::new(1, 0)), loc()));
        let two = arena.alloc(Expr::new(ExprKind::Number(2.0), loc()));
        let neg = arena.alloc(Expr::new(ExprKind::Negate { operand: two }, loc()));
        let root = arena.alloc(Expr::new(
            ExprKind::BinaryOp {
                op: BinaryOperator::Multiply,
                lhs: a,
                rhs: neg,
            },
            loc(),
        ));

        assert_eq!(
            arena.dump(root).to_string(),
            "BOP(MULT):\n  CELL(1, 0)\n  UOP(MINUS):\n    NUMBER: 2.000000\n"
        );
    }
}

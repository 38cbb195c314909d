//! Formula evaluator
//!
//! Resolves every cell of a [`Grid`] exactly once. A cell's dependencies
//! (cell references and clone neighbors) are evaluated on demand, depth
//! first; each cell's [`EvalStatus`] memoizes finished work and turns
//! re-entry into a circular dependency error instead of endless recursion.

use pipesheet_core::{Cell, CellAddress, CellContent, EvalStatus, ExprId, Grid, Location};
use tracing::{debug, trace};

use crate::ast::{ExprArena, ExprKind};
use crate::error::{FormulaError, FormulaResult};
use crate::stack::ensure_sufficient_stack;

/// Evaluation pass over a grid and the arena its formulas live in
pub struct Evaluator<'a> {
    pub(crate) grid: &'a mut Grid,
    pub(crate) arena: &'a mut ExprArena,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator
    pub fn new(grid: &'a mut Grid, arena: &'a mut ExprArena) -> Self {
        Self { grid, arena }
    }

    /// Evaluate every cell in row-major order
    ///
    /// Stops at the first error.
    pub fn evaluate_all(&mut self) -> FormulaResult<()> {
        debug!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            "evaluating table"
        );

        let addresses: Vec<CellAddress> = self.grid.addresses().collect();
        for addr in addresses {
            self.evaluate_cell(addr)?;
        }

        Ok(())
    }

    /// Evaluate one cell (and whatever it depends on)
    ///
    /// Calling this again on an evaluated cell is a no-op.
    pub fn evaluate_cell(&mut self, addr: CellAddress) -> FormulaResult<()> {
        self.evaluate_cell_from(addr, None)
    }

    /// Evaluate `addr` on behalf of the reference or clone at `origin`
    pub(crate) fn evaluate_cell_from(
        &mut self,
        addr: CellAddress,
        origin: Option<&Location>,
    ) -> FormulaResult<()> {
        ensure_sufficient_stack(|| self.evaluate_cell_inner(addr, origin))
    }

    fn evaluate_cell_inner(
        &mut self,
        addr: CellAddress,
        origin: Option<&Location>,
    ) -> FormulaResult<()> {
        let cell = self.cell_mut(addr)?;

        if matches!(cell.content(), CellContent::Text(_) | CellContent::Number(_)) {
            cell.set_status(EvalStatus::Evaluated);
            return Ok(());
        }

        match cell.status() {
            EvalStatus::Evaluated => return Ok(()),
            EvalStatus::InProgress => {
                return Err(FormulaError::CircularDependency {
                    location: cell.location().clone(),
                    origin: origin.cloned(),
                })
            }
            EvalStatus::Unevaluated => {}
        }

        cell.set_status(EvalStatus::InProgress);
        let location = cell.location().clone();
        trace!(cell = %addr, kind = cell.kind_name(), "evaluating cell");

        match *cell.content() {
            CellContent::Expr { ast, .. } => {
                let value = self.evaluate_expr(ast)?;
                self.cell_mut(addr)?
                    .set_content(CellContent::Expr { ast, value });
            }
            CellContent::Clone(direction) => {
                self.resolve_clone(addr, direction, &location)?;
            }
            CellContent::Text(_) | CellContent::Number(_) => {
                return Err(FormulaError::Internal("plain cells never enter evaluation"))
            }
        }

        self.cell_mut(addr)?.set_status(EvalStatus::Evaluated);
        Ok(())
    }

    /// Evaluate an expression node to a number
    pub fn evaluate_expr(&mut self, id: ExprId) -> FormulaResult<f64> {
        let kind = self.arena[id].kind;

        match kind {
            ExprKind::Number(n) => Ok(n),

            ExprKind::CellRef(target) => {
                let location = self.arena[id].location.clone();
                if !self.grid.contains(target) {
                    return Err(FormulaError::ReferenceOutOfBounds {
                        location,
                        address: target,
                    });
                }

                self.evaluate_cell_from(target, Some(&location))?;

                let cell = self.cell(target)?;
                match cell.content() {
                    CellContent::Number(n) => Ok(*n),
                    CellContent::Expr { value, .. } => Ok(*value),
                    CellContent::Text(_) => Err(FormulaError::TextInArithmetic {
                        location,
                        target: cell.location().clone(),
                    }),
                    CellContent::Clone(_) => Err(FormulaError::Internal(
                        "cell should never be a clone after the evaluation",
                    )),
                }
            }

            ExprKind::BinaryOp { op, lhs, rhs } => {
                let lhs = self.evaluate_expr(lhs)?;
                let rhs = self.evaluate_expr(rhs)?;
                Ok(op.apply(lhs, rhs))
            }

            ExprKind::Negate { operand } => Ok(-self.evaluate_expr(operand)?),
        }
    }

    pub(crate) fn cell(&self, addr: CellAddress) -> FormulaResult<&Cell> {
        self.grid
            .get(addr)
            .ok_or(FormulaError::Internal("evaluated address outside of the table"))
    }

    pub(crate) fn cell_mut(&mut self, addr: CellAddress) -> FormulaResult<&mut Cell> {
        self.grid
            .get_mut(addr)
            .ok_or(FormulaError::Internal("evaluated address outside of the table"))
    }
}

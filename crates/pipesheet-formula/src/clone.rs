//! Clone resolution
//!
//! A clone cell takes over its neighbor's content. Plain values are copied
//! as they are; a formula is copied node by node with every cell reference
//! moved along with it, so `:<` next to `=A1+1` in column A reads `=B1+1`.

use pipesheet_core::{CellAddress, CellContent, Direction, ExprId, Location};
use tracing::trace;

use crate::ast::{Expr, ExprArena, ExprKind};
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::Evaluator;
use crate::stack::ensure_sufficient_stack;

impl Evaluator<'_> {
    /// Resolve the clone cell at `addr`, which copies from `direction`
    ///
    /// The cell must already be marked in progress.
    pub(crate) fn resolve_clone(
        &mut self,
        addr: CellAddress,
        direction: Direction,
        location: &Location,
    ) -> FormulaResult<()> {
        let source = addr
            .neighbor(direction)
            .filter(|n| self.grid.contains(*n))
            .ok_or_else(|| FormulaError::CloneOutOfBounds {
                location: location.clone(),
                address: addr,
                direction,
            })?;

        self.evaluate_cell_from(source, Some(location))?;

        let content = match self.cell(source)?.content().clone() {
            CellContent::Expr { ast, .. } => {
                let ast = rebase_expr(self.arena, ast, direction.opposite(), location)?;
                trace!(cell = %addr, from = %source, "rebased cloned formula");
                let value = self.evaluate_expr(ast)?;
                CellContent::Expr { ast, value }
            }
            CellContent::Clone(_) => {
                return Err(FormulaError::Internal(
                    "cell should never be a clone after the evaluation",
                ))
            }
            plain => plain,
        };

        self.cell_mut(addr)?.set_content(content);
        Ok(())
    }
}

/// Copy the expression at `root` with every cell reference moved one step
/// in `shift`
///
/// The copy is written to fresh arena slots, children before parents, and
/// every copied node is located at `location`. The original tree is left
/// untouched. Moving a reference above row 0 or left of column A fails
/// with [`FormulaError::RebaseOutOfBounds`].
pub fn rebase_expr(
    arena: &mut ExprArena,
    root: ExprId,
    shift: Direction,
    location: &Location,
) -> FormulaResult<ExprId> {
    ensure_sufficient_stack(|| {
        let kind = match arena[root].kind {
            ExprKind::Number(n) => ExprKind::Number(n),
            ExprKind::CellRef(address) => {
                let moved = address.neighbor(shift).ok_or_else(|| {
                    FormulaError::RebaseOutOfBounds {
                        location: location.clone(),
                        address,
                        direction: shift,
                    }
                })?;
                ExprKind::CellRef(moved)
            }
            ExprKind::BinaryOp { op, lhs, rhs } => {
                let lhs = rebase_expr(arena, lhs, shift, location)?;
                let rhs = rebase_expr(arena, rhs, shift, location)?;
                ExprKind::BinaryOp { op, lhs, rhs }
            }
            ExprKind::Negate { operand } => ExprKind::Negate {
                operand: rebase_expr(arena, operand, shift, location)?,
            },
        };

        Ok(arena.alloc(Expr::new(kind, location.clone())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_cell;
    use crate::error::ErrorKind;
    use crate::parser::parse_formula;
    use pipesheet_core::{EvalStatus, Grid};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn loc(row: usize, col: usize) -> Location {
        Location::new(Arc::from("c.txt"), row, col)
    }

    fn table(rows: &[&[&str]]) -> (Grid, ExprArena) {
        let file: Arc<str> = Arc::from("c.txt");
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut arena = ExprArena::new();
        let mut cells = Vec::new();
        for (r, row) in rows.iter().enumerate() {
            for c in 0..cols {
                let text = row.get(c).copied().unwrap_or("");
                let location = Location::new(file.clone(), r + 1, c * 10 + 1);
                cells.push(classify_cell(text, location, &mut arena).unwrap());
            }
        }
        (Grid::new(file, rows.len(), cols, cells).unwrap(), arena)
    }

    fn eval(rows: &[&[&str]]) -> FormulaResult<(Grid, ExprArena)> {
        let (mut grid, mut arena) = table(rows);
        Evaluator::new(&mut grid, &mut arena).evaluate_all()?;
        Ok((grid, arena))
    }

    fn cell_dump(grid: &Grid, arena: &ExprArena, addr: &str) -> String {
        match grid.get(addr.parse().unwrap()).unwrap().content() {
            CellContent::Expr { ast, .. } => arena.dump(*ast).to_string(),
            other => panic!("Expected Expr, got {:?}", other),
        }
    }

    #[test]
    fn test_rebase_shifts_references() {
        let mut arena = ExprArena::new();
        let root = parse_formula("A1+1", loc(2, 2), &mut arena).unwrap();
        let before = arena.len();

        let moved = rebase_expr(&mut arena, root, Direction::Right, &loc(2, 11)).unwrap();

        assert_eq!(arena.len(), before * 2);
        assert_eq!(
            arena.dump(moved).to_string(),
            "BOP(PLUS):\n  CELL(1, 1)\n  NUMBER: 1.000000\n"
        );
        // the source tree is untouched
        assert_eq!(
            arena.dump(root).to_string(),
            "BOP(PLUS):\n  CELL(1, 0)\n  NUMBER: 1.000000\n"
        );
        assert_eq!(arena[moved].location, loc(2, 11));
    }

    #[test]
    fn test_rebase_past_edge() {
        let mut arena = ExprArena::new();
        let root = parse_formula("-A0", loc(1, 2), &mut arena).unwrap();

        let err = rebase_expr(&mut arena, root, Direction::Up, &loc(2, 1)).unwrap_err();
        assert!(matches!(
            err,
            FormulaError::RebaseOutOfBounds { direction: Direction::Up, .. }
        ));
        assert_eq!(err.kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_clone_left_formula() {
        let (grid, arena) = eval(&[&["1", "10"], &["=A0+1", ":<"]]).unwrap();

        assert_eq!(grid.get(CellAddress::new(1, 0)).unwrap().as_number(), Some(2.0));
        assert_eq!(grid.get(CellAddress::new(1, 1)).unwrap().as_number(), Some(11.0));
        assert_eq!(
            cell_dump(&grid, &arena, "B1"),
            "BOP(PLUS):\n  CELL(0, 1)\n  NUMBER: 1.000000\n"
        );
    }

    #[test]
    fn test_clone_down_a_column() {
        // running total
        let (grid, _) = eval(&[
            &["1", "=A0"],
            &["2", "=B0+A1"],
            &["3", ":^"],
            &["4", ":^"],
        ])
        .unwrap();

        let totals: Vec<f64> = (0..4)
            .map(|r| grid.get(CellAddress::new(r, 1)).unwrap().as_number().unwrap())
            .collect();
        assert_eq!(totals, vec![1.0, 3.0, 6.0, 10.0]);
    }

    #[test]
    fn test_clone_plain_values() {
        let (grid, _) = eval(&[&["hello", ":<"], &["2.5", ":<"]]).unwrap();

        assert_eq!(
            grid.get(CellAddress::new(0, 1)).unwrap().content(),
            &CellContent::Text("hello".into())
        );
        assert_eq!(grid.get(CellAddress::new(1, 1)).unwrap().as_number(), Some(2.5));
        assert!(grid.iter().all(|(_, c)| !c.is_clone()));
        assert!(grid.iter().all(|(_, c)| c.status() == EvalStatus::Evaluated));
    }

    #[test]
    fn test_clone_chain_resolves_in_any_order() {
        // B0 clones C0, which itself clones D0
        let (grid, arena) = eval(&[&["5", ":>", ":>", "=C1*2"], &["1", "2", "3", "4"]]).unwrap();

        let values: Vec<f64> = (1..4)
            .map(|c| grid.get(CellAddress::new(0, c)).unwrap().as_number().unwrap())
            .collect();
        assert_eq!(values, vec![2.0, 4.0, 6.0]);
        assert_eq!(
            cell_dump(&grid, &arena, "B0"),
            "BOP(MULT):\n  CELL(1, 0)\n  NUMBER: 2.000000\n"
        );
    }

    #[test]
    fn test_clone_outside_table() {
        let err = eval(&[&[":^"]]).unwrap_err();
        match err {
            FormulaError::CloneOutOfBounds { location, direction, .. } => {
                assert_eq!(direction, Direction::Up);
                assert_eq!((location.row, location.col), (1, 1));
            }
            other => panic!("Expected CloneOutOfBounds, got {:?}", other),
        }

        let err = eval(&[&["1", ":>"]]).unwrap_err();
        assert!(matches!(err, FormulaError::CloneOutOfBounds { .. }));
    }

    #[test]
    fn test_clone_cycle() {
        let err = eval(&[&[":>", ":<"]]).unwrap_err();
        match err {
            FormulaError::CircularDependency { location, origin } => {
                assert_eq!(location.col, 1);
                assert_eq!(origin.map(|o| o.col), Some(11));
            }
            other => panic!("Expected CircularDependency, got {:?}", other),
        }
    }

    #[test]
    fn test_cloned_formula_referencing_itself() {
        // B0 becomes `=B1`, and B1 clones B0
        let err = eval(&[&["=A1", ":<"], &["7", ":^"]]).unwrap_err();
        match err {
            FormulaError::CircularDependency { location, origin } => {
                assert_eq!((location.row, location.col), (1, 11));
                assert_eq!(origin.map(|o| (o.row, o.col)), Some((2, 11)));
            }
            other => panic!("Expected CircularDependency, got {:?}", other),
        }
    }
}

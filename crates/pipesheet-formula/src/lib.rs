//! # pipesheet-formula
//!
//! Formula handling for pipesheet tables.
//!
//! This crate provides:
//! - Cell classification (raw field → text, number, formula or clone)
//! - Formula lexing and parsing (text → arena-allocated AST)
//! - Evaluation with memoization and cycle detection
//! - Clone resolution, rebasing copied formulas onto the clone's position
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pipesheet_core::{CellAddress, Grid, Location};
//! use pipesheet_formula::{classify_cell, Evaluator, ExprArena};
//!
//! let file: Arc<str> = Arc::from("inline");
//! let mut arena = ExprArena::new();
//! let cells = ["1", "2", "=A0+B0"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, text)| classify_cell(text, Location::new(file.clone(), 1, i * 2 + 1), &mut arena))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let mut grid = Grid::new(file, 1, 3, cells).unwrap();
//! Evaluator::new(&mut grid, &mut arena).evaluate_all().unwrap();
//!
//! assert_eq!(grid.get(CellAddress::new(0, 2)).unwrap().as_number(), Some(3.0));
//! ```

pub mod ast;
pub mod classify;
pub mod clone;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
mod stack;

pub use ast::{BinaryOperator, Expr, ExprArena, ExprDump, ExprKind};
pub use classify::classify_cell;
pub use clone::rebase_expr;
pub use error::{ErrorKind, FormulaError, FormulaResult};
pub use evaluator::Evaluator;
pub use parser::parse_formula;

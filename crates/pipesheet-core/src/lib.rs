//! # pipesheet-core
//!
//! Core data structures for the pipesheet formula table evaluator.
//!
//! This crate provides the fundamental types used throughout pipesheet:
//! - [`Cell`] and [`CellContent`] - What a grid position holds (text, number, formula, clone)
//! - [`CellAddress`] and [`Direction`] - Grid addressing and neighbor lookup
//! - [`Location`] - `file:row:col` positions used by every diagnostic
//! - [`ExprId`] - Handle into the formula expression arena
//! - [`Grid`] - The fixed-size, row-major table of cells
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pipesheet_core::{Cell, CellAddress, CellContent, Grid, Location};
//!
//! let file: Arc<str> = Arc::from("input.txt");
//! let cells = vec![
//!     Cell::new(CellContent::Number(1.0), Location::new(file.clone(), 1, 1)),
//!     Cell::new(CellContent::Text("total".into()), Location::new(file.clone(), 1, 5)),
//! ];
//! let grid = Grid::new(file, 1, 2, cells).unwrap();
//!
//! assert_eq!(grid.get(CellAddress::new(0, 1)).unwrap().kind_name(), "TEXT");
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod location;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellContent, CellValue, Direction, EvalStatus, ExprId};
pub use error::{Error, Result};
pub use grid::{Grid, GridDump};
pub use location::Location;

/// Number of distinct column letters a formula reference can name (`A`..=`Z`)
pub const MAX_REFERENCE_COLS: usize = 26;

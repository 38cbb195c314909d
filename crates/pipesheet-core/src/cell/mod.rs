//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Cell`] and [`CellContent`] - What a grid position holds
//! - [`CellAddress`] - A cell's position in the grid (e.g., "A0")
//! - [`Direction`] - Which neighbor a clone cell copies from
//! - [`ExprId`] - Handle of a parsed formula

mod address;
mod value;

pub use address::{CellAddress, Direction};
pub use value::{Cell, CellContent, CellValue, EvalStatus, ExprId};

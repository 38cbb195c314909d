//! Grid type

use std::fmt;
use std::sync::Arc;

use crate::cell::{Cell, CellAddress};
use crate::error::{Error, Result};

/// A fixed-size table of cells stored row by row
///
/// Built once from the input and never resized. The evaluator mutates cells
/// in place (status, computed values, resolved clones).
#[derive(Debug, Clone)]
pub struct Grid {
    /// Path the table was read from
    file: Arc<str>,
    rows: usize,
    cols: usize,
    /// Row-major cell storage, `rows * cols` long
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid from row-major cells
    pub fn new(file: Arc<str>, rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        let expected = rows * cols;
        if cells.len() != expected {
            return Err(Error::DimensionMismatch {
                rows,
                cols,
                expected,
                actual: cells.len(),
            });
        }

        Ok(Self {
            file,
            rows,
            cols,
            cells,
        })
    }

    /// Path the table was read from
    pub fn file(&self) -> &Arc<str> {
        &self.file
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if an address falls inside the grid
    pub fn contains(&self, addr: CellAddress) -> bool {
        addr.row < self.rows && addr.col < self.cols
    }

    fn offset(&self, addr: CellAddress) -> Option<usize> {
        self.contains(addr).then(|| addr.row * self.cols + addr.col)
    }

    // === Cell Access ===

    /// Get a cell by address
    pub fn get(&self, addr: CellAddress) -> Option<&Cell> {
        self.offset(addr).map(|i| &self.cells[i])
    }

    /// Get a mutable cell by address
    pub fn get_mut(&mut self, addr: CellAddress) -> Option<&mut Cell> {
        self.offset(addr).map(move |i| &mut self.cells[i])
    }

    /// All addresses in row-major order
    pub fn addresses(&self) -> impl Iterator<Item = CellAddress> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| CellAddress::new(row, col)))
    }

    /// Iterate over cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellAddress, &Cell)> {
        self.addresses().zip(self.cells.iter())
    }

    /// Iterate over the cells of one row
    pub fn row(&self, row: usize) -> &[Cell] {
        if row >= self.rows {
            return &[];
        }
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// One `file:row:col: KIND` line per cell, in row-major order
    pub fn dump(&self) -> GridDump<'_> {
        GridDump { grid: self }
    }
}

/// Display adapter returned by [`Grid::dump`]
pub struct GridDump<'a> {
    grid: &'a Grid,
}

impl fmt::Display for GridDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.grid.cells {
            writeln!(f, "{}: {}", cell.location(), cell.kind_name())?;
        }
        Ok(())
    }
}

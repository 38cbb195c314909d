//! Table writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use pipesheet_core::{CellValue, Grid};

use crate::error::{TableError, TableResult};
use crate::options::TableWriteOptions;

/// Aligned table renderer
pub struct TableWriter;

impl TableWriter {
    /// Render an evaluated grid to a file
    pub fn write_file<P: AsRef<Path>>(
        grid: &Grid,
        path: P,
        options: &TableWriteOptions,
    ) -> TableResult<()> {
        let file = File::create(path)?;
        Self::write(grid, file, options)
    }

    /// Render an evaluated grid to a string
    pub fn write_to_string(grid: &Grid, options: &TableWriteOptions) -> TableResult<String> {
        let mut buf = Vec::new();
        Self::write(grid, &mut buf, options)?;
        String::from_utf8(buf).map_err(|_| TableError::Internal("rendered table is not UTF-8"))
    }

    /// Render an evaluated grid to a writer
    ///
    /// Each cell is padded on the right to the widest cell of its column and
    /// cells are joined by the delimiter. Every cell must be evaluated: an
    /// unresolved clone is an internal error.
    pub fn write<W: Write>(grid: &Grid, mut writer: W, options: &TableWriteOptions) -> TableResult<()> {
        let rendered = grid
            .iter()
            .map(|(_, cell)| {
                cell.value()
                    .map(|value| render_value(value, options.precision))
                    .ok_or(TableError::Internal(
                        "cell should never be a clone after the evaluation",
                    ))
            })
            .collect::<TableResult<Vec<String>>>()?;

        let cols = grid.cols();
        let mut widths = vec![0usize; cols];
        for (i, text) in rendered.iter().enumerate() {
            let width = &mut widths[i % cols];
            *width = (*width).max(text.chars().count());
        }

        if cols > 0 {
            for row in rendered.chunks(cols) {
                for (col, text) in row.iter().enumerate() {
                    if col > 0 {
                        write!(writer, "{}", options.delimiter)?;
                    }
                    write!(writer, "{:<width$}", text, width = widths[col])?;
                }
                writeln!(writer)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

fn render_value(value: CellValue<'_>, precision: usize) -> String {
    match value {
        CellValue::Text(text) => text.to_string(),
        CellValue::Number(n) => format!("{:.*}", precision, n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipesheet_core::{Cell, CellAddress, CellContent, Direction, Location};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn grid(rows: usize, cols: usize, contents: Vec<CellContent>) -> Grid {
        let file: Arc<str> = Arc::from("w.txt");
        let cells = contents
            .into_iter()
            .map(|c| Cell::new(c, Location::new(file.clone(), 1, 1)))
            .collect();
        Grid::new(file, rows, cols, cells).unwrap()
    }

    fn text(s: &str) -> CellContent {
        CellContent::Text(s.to_string())
    }

    #[test]
    fn test_columns_are_aligned() {
        let grid = grid(
            2,
            2,
            vec![
                text("name"),
                CellContent::Number(1.0),
                text("a"),
                CellContent::Expr {
                    ast: pipesheet_core::ExprId::new(0),
                    value: -12.5,
                },
            ],
        );

        let out = TableWriter::write_to_string(&grid, &TableWriteOptions::default()).unwrap();
        assert_eq!(out, "name|1.000000  \na   |-12.500000\n");
    }

    #[test]
    fn test_custom_delimiter_and_precision() {
        let grid = grid(1, 3, vec![text("x"), CellContent::Number(2.0), text("")]);
        let options = TableWriteOptions {
            delimiter: ',',
            precision: 2,
        };

        let out = TableWriter::write_to_string(&grid, &options).unwrap();
        assert_eq!(out, "x,2.00,\n");
    }

    #[test]
    fn test_non_finite_values() {
        let grid = grid(
            1,
            2,
            vec![CellContent::Number(f64::INFINITY), CellContent::Number(f64::NAN)],
        );
        let out = TableWriter::write_to_string(&grid, &TableWriteOptions::default()).unwrap();
        assert_eq!(out, "inf|NaN\n");
    }

    #[test]
    fn test_unresolved_clone_is_internal() {
        let grid = grid(1, 1, vec![CellContent::Clone(Direction::Left)]);
        let err = TableWriter::write_to_string(&grid, &TableWriteOptions::default()).unwrap_err();
        assert!(err.is_internal());
        assert!(grid.get(CellAddress::new(0, 0)).unwrap().is_clone());
    }

    #[test]
    fn test_empty_grid() {
        let grid = grid(0, 0, Vec::new());
        let out = TableWriter::write_to_string(&grid, &TableWriteOptions::default()).unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let grid = grid(1, 2, vec![text("a"), text("bb")]);

        TableWriter::write_file(&grid, &path, &TableWriteOptions::default()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a|bb\n");
    }
}

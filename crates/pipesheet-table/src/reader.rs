//! Table reader

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use csv::StringRecord;
use pipesheet_core::{Cell, Grid, Location, MAX_REFERENCE_COLS};
use pipesheet_formula::{classify_cell, ExprArena};
use tracing::{debug, warn};

use crate::error::{TableError, TableResult};
use crate::options::TableReadOptions;

/// Delimited table reader
pub struct TableReader;

impl TableReader {
    /// Read a table file into a classified grid and the arena holding its formulas
    pub fn read_file<P: AsRef<Path>>(
        path: P,
        options: &TableReadOptions,
    ) -> TableResult<(Grid, ExprArena)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::read(file, &path.display().to_string(), options)
    }

    /// Read a table from in-memory text
    pub fn read_str(
        content: &str,
        file_name: &str,
        options: &TableReadOptions,
    ) -> TableResult<(Grid, ExprArena)> {
        Self::read(content.as_bytes(), file_name, options)
    }

    /// Read a table from a reader
    ///
    /// `file_name` is only used to locate cells in diagnostics.
    pub fn read<R: Read>(
        mut reader: R,
        file_name: &str,
        options: &TableReadOptions,
    ) -> TableResult<(Grid, ExprArena)> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quoting(false)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        // Blank lines produce no record but still occupy a row
        let mut lines: Vec<Option<Line>> = Vec::new();
        lines.resize_with(content.lines().count(), || None);
        for result in csv_reader.records() {
            let line = Line::new(result?);
            let row = line
                .number
                .checked_sub(1)
                .ok_or(TableError::Internal("record without a line number"))?;
            if row >= lines.len() {
                lines.resize_with(row + 1, || None);
            }
            lines[row] = Some(line);
        }

        let rows = lines.len();
        let cols = lines.iter().flatten().map(|line| line.fields).max().unwrap_or(0);
        let file: Arc<str> = Arc::from(file_name);

        let mut arena = ExprArena::new();
        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in lines.iter().enumerate() {
            let Some(line) = line else {
                cells.extend(
                    (0..cols).map(|_| Cell::empty(Location::new(file.clone(), row + 1, 1))),
                );
                continue;
            };
            for col in 0..cols {
                let cell = match line.field(col) {
                    Some((text, column)) => {
                        let location = Location::new(file.clone(), line.number, column);
                        classify_cell(text, location, &mut arena)?
                    }
                    None => Cell::empty(Location::new(
                        file.clone(),
                        line.number,
                        line.end_column(),
                    )),
                };
                cells.push(cell);
            }
        }

        let grid = Grid::new(file, rows, cols, cells)?;
        if cols > MAX_REFERENCE_COLS {
            warn!(
                cols,
                "columns past {} cannot be referenced from formulas",
                MAX_REFERENCE_COLS
            );
        }
        debug!(
            file = %grid.file(),
            rows,
            cols,
            exprs = arena.len(),
            "table loaded"
        );

        Ok((grid, arena))
    }
}

/// One input record plus where it sits in the file
struct Line {
    number: usize,
    record: StringRecord,
    /// Field count, not counting an empty field after a trailing delimiter
    fields: usize,
}

impl Line {
    fn new(record: StringRecord) -> Self {
        let number = record.position().map_or(0, |p| p.line() as usize);

        let mut fields = record.len();
        if fields > 1 && record.get(fields - 1) == Some("") {
            fields -= 1;
        }

        Self {
            number,
            record,
            fields,
        }
    }

    /// Trimmed text of field `index` and the 1-based column of its first
    /// non-blank byte
    fn field(&self, index: usize) -> Option<(&str, usize)> {
        if index >= self.fields {
            return None;
        }

        let raw = self.record.get(index)?;
        let range = self.record.range(index)?;
        let text = raw.trim_start();
        // one delimiter byte precedes each earlier field
        let column = range.start + index + (raw.len() - text.len()) + 1;

        Some((text.trim_end(), column))
    }

    /// Column just past the last byte of the line
    fn end_column(&self) -> usize {
        let last = self.record.len().saturating_sub(1);
        let end = self.record.range(last).map_or(0, |r| r.end);
        end + last + 1
    }
}

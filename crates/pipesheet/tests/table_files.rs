//! Tests for reading and writing table files

use std::fs;

use pipesheet::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_open_calculate_write() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "budget.txt", "rent | 1200\nfood | 300\ntotal | =B0+B1\n");
    let output = dir.path().join("out.txt");

    let mut sheet = Spreadsheet::open(&input).unwrap();
    let stats = sheet.calculate().unwrap();
    assert_eq!(stats.formula_count, 1);

    let options = TableWriteOptions {
        delimiter: '|',
        precision: 0,
    };
    TableWriter::write_file(sheet.grid(), &output, &options).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "rent |1200\nfood |300 \ntotal|1500\n"
    );
}

#[test]
fn test_errors_name_the_input_path() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "bad.txt", "1\n=A0+Q\n");

    let err = Spreadsheet::open(&input).unwrap_err();
    let expected_prefix = format!("{}:2:5: ERROR:", input.display());
    assert!(
        err.to_string().starts_with(&expected_prefix),
        "unexpected message: {}",
        err
    );
}

#[test]
fn test_open_with_semicolons() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "semi.txt", "2;=A0*A0;:<\n");

    let options = TableReadOptions { delimiter: b';' };
    let mut sheet = Spreadsheet::open_with_options(&input, &options).unwrap();
    sheet.calculate().unwrap();

    // C0 squares B0
    assert_eq!(sheet.number(CellAddress::new(0, 2)), Some(16.0));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Spreadsheet::open(dir.path().join("missing.txt")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

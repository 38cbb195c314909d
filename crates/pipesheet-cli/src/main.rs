//! pipesheet CLI - evaluate formula tables

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pipesheet::prelude::*;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// Exit status for a broken internal invariant
const EXIT_INTERNAL: u8 = 69;

#[derive(Parser)]
#[command(name = "pipesheet")]
#[command(
    author,
    version,
    about = "Evaluate spreadsheet formulas in pipe-delimited text tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a table and print it with aligned columns
    Eval {
        /// Input table file
        input: PathBuf,

        /// Field delimiter used by the input and the output
        #[arg(short, long, default_value = "|")]
        delimiter: char,

        /// Fractional digits printed for numbers
        #[arg(short, long, default_value = "6")]
        precision: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the evaluated cells as JSON instead of a table
        #[arg(long, conflicts_with = "output")]
        json: bool,
    },

    /// Show the size of a table and the kind of every cell
    Info {
        /// Input table file
        input: PathBuf,

        /// Field delimiter
        #[arg(short, long, default_value = "|")]
        delimiter: char,
    },

    /// Print the parsed expression of every formula cell
    Ast {
        /// Input table file
        input: PathBuf,

        /// Field delimiter
        #[arg(short, long, default_value = "|")]
        delimiter: char,
    },
}

/// One evaluated cell in `--json` output
#[derive(Serialize)]
struct CellRecord<'a> {
    cell: String,
    location: &'a Location,
    kind: &'static str,
    value: Option<CellValue<'a>>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            input,
            delimiter,
            precision,
            output,
            json,
        } => eval(&input, delimiter, precision, output.as_deref(), json),
        Commands::Info { input, delimiter } => show_info(&input, delimiter),
        Commands::Ast { input, delimiter } => show_ast(&input, delimiter),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

/// Install a stderr subscriber when `RUST_LOG` is set
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Print an error and pick the exit status
fn report(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<TableError>() {
        Some(table_err) if table_err.is_internal() => {
            eprintln!("UNREACHABLE: {}", table_err);
            ExitCode::from(EXIT_INTERNAL)
        }
        // already prefixed with the cell location
        Some(TableError::Formula(formula_err)) => {
            eprintln!("{}", formula_err);
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("ERROR: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn read_options(delimiter: char) -> Result<TableReadOptions> {
    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter '{}' must be a single ASCII character", delimiter))?;
    Ok(TableReadOptions { delimiter })
}

fn open(input: &Path, delimiter: char) -> Result<Spreadsheet> {
    let options = read_options(delimiter)?;
    Spreadsheet::open_with_options(input, &options)
        .with_context(|| format!("could not read file {}", input.display()))
}

fn eval(
    input: &Path,
    delimiter: char,
    precision: usize,
    output: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut sheet = open(input, delimiter)?;
    let stats = sheet.calculate()?;
    debug!(
        formulas = stats.formula_count,
        clones = stats.clones_resolved,
        "table evaluated"
    );

    if json {
        let records: Vec<CellRecord<'_>> = sheet
            .grid()
            .iter()
            .map(|(addr, cell)| CellRecord {
                cell: addr.to_string(),
                location: cell.location(),
                kind: cell.kind_name(),
                value: cell.value(),
            })
            .collect();

        let stdout = io::stdout();
        let mut out = stdout.lock();
        serde_json::to_writer_pretty(&mut out, &records).context("Failed to write JSON")?;
        writeln!(out).context("Failed to write to stdout")?;
        return Ok(());
    }

    let options = TableWriteOptions {
        delimiter,
        precision,
    };

    if let Some(output_path) = output {
        TableWriter::write_file(sheet.grid(), output_path, &options)
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!(
            "Wrote {} rows to '{}'",
            sheet.grid().rows(),
            output_path.display()
        );
    } else {
        sheet
            .write(io::stdout().lock(), &options)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}

fn show_info(input: &Path, delimiter: char) -> Result<()> {
    let sheet = open(input, delimiter)?;
    let grid = sheet.grid();

    let count = |kind: &str| grid.iter().filter(|(_, c)| c.kind_name() == kind).count();

    println!("File: {}", input.display());
    println!("Size: {} rows x {} columns", grid.rows(), grid.cols());
    println!(
        "Cells: {} text, {} numbers, {} formulas, {} clones",
        count("TEXT"),
        count("NUMBER"),
        count("EXPR"),
        count("CLONE")
    );
    println!("Expression nodes: {}", sheet.arena().len());
    println!();
    print!("{}", sheet.dump_cells());

    Ok(())
}

fn show_ast(input: &Path, delimiter: char) -> Result<()> {
    let sheet = open(input, delimiter)?;

    io::stdout()
        .write_all(sheet.dump_formulas().as_bytes())
        .context("Failed to write to stdout")?;

    Ok(())
}

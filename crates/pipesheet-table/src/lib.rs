//! # pipesheet-table
//!
//! Reader and writer for pipe-delimited formula tables.
//!
//! [`TableReader`] turns delimited text into a classified [`Grid`] plus the
//! [`ExprArena`] holding its parsed formulas; [`TableWriter`] renders an
//! evaluated grid back as aligned columns.
//!
//! [`Grid`]: pipesheet_core::Grid
//! [`ExprArena`]: pipesheet_formula::ExprArena

mod reader;
mod writer;
mod options;
mod error;

pub use reader::TableReader;
pub use writer::TableWriter;
pub use options::{TableReadOptions, TableWriteOptions};
pub use error::{TableError, TableResult};

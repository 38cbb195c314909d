//! Formula error types

use pipesheet_core::{CellAddress, Direction, Location};
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Broad class of a [`FormulaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized character in a formula
    Lex,
    /// Malformed formula
    Parse,
    /// Well-formed input that cannot be given a meaning
    Semantic,
    /// Text used where a number is required
    Type,
    /// Reading or writing the table failed (never produced by formulas)
    Io,
    /// Broken evaluator invariant
    Internal,
}

/// Errors that can occur during formula parsing or evaluation
///
/// Every user-facing variant renders with a `file:row:col:` prefix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Character that starts no token
    #[error("{location}: ERROR: unknown token starts with `{character}`")]
    UnknownToken { location: Location, character: char },

    /// Input ended where an operand was required
    #[error("{location}: ERROR: expected primary expression token, but got end of input")]
    UnexpectedEnd { location: Location },

    /// Name that is neither a number nor a cell reference
    #[error("{location}: ERROR: invalid cell reference `{token}`: {reason}")]
    InvalidReference {
        location: Location,
        token: String,
        reason: String,
    },

    /// `(` without its `)`
    #[error("{location}: ERROR: expected token `)` but got {found}")]
    UnclosedParen { location: Location, found: String },

    /// Token that cannot appear at this position
    #[error("{location}: ERROR: unexpected token `{token}`")]
    UnexpectedToken { location: Location, token: String },

    /// Clone marker other than `<`, `>`, `^`, `v`
    #[error("{location}: ERROR: `{marker}` is not a correct direction to clone a cell from")]
    InvalidCloneDirection { location: Location, marker: String },

    /// Clone whose neighbor lies outside the table
    #[error("{location}: ERROR: trying to clone a cell outside of the table ({direction} of {address})")]
    CloneOutOfBounds {
        location: Location,
        address: CellAddress,
        direction: Direction,
    },

    /// Rebasing a cloned formula moves a reference past the top or left edge
    #[error("{location}: ERROR: cloning moves reference {address} {direction}, outside of the table")]
    RebaseOutOfBounds {
        location: Location,
        address: CellAddress,
        direction: Direction,
    },

    /// Reference to a cell the table does not have
    #[error("{location}: ERROR: reference {address} is outside of the table")]
    ReferenceOutOfBounds {
        location: Location,
        address: CellAddress,
    },

    /// Cell reached again while its own value is being computed
    #[error("{location}: ERROR: circular dependency is detected!{}", origin_note(.origin))]
    CircularDependency {
        location: Location,
        /// Reference or clone that re-entered the cell
        origin: Option<Location>,
    },

    /// Text cell used in arithmetic
    #[error("{location}: ERROR: text cells may not participate in math expressions\n{target}: NOTE: the text cell is located here")]
    TextInArithmetic { location: Location, target: Location },

    /// Evaluator invariant violation
    #[error("internal error: {0}")]
    Internal(&'static str),
}

fn origin_note(origin: &Option<Location>) -> String {
    match origin {
        Some(origin) => format!("\n{origin}: NOTE: the dependency is requested here"),
        None => String::new(),
    }
}

impl FormulaError {
    /// Broad class of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormulaError::UnknownToken { .. } => ErrorKind::Lex,
            FormulaError::UnexpectedEnd { .. }
            | FormulaError::InvalidReference { .. }
            | FormulaError::UnclosedParen { .. }
            | FormulaError::UnexpectedToken { .. } => ErrorKind::Parse,
            FormulaError::InvalidCloneDirection { .. }
            | FormulaError::CloneOutOfBounds { .. }
            | FormulaError::RebaseOutOfBounds { .. }
            | FormulaError::ReferenceOutOfBounds { .. }
            | FormulaError::CircularDependency { .. } => ErrorKind::Semantic,
            FormulaError::TextInArithmetic { .. } => ErrorKind::Type,
            FormulaError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Primary location of the error, if it has one
    pub fn location(&self) -> Option<&Location> {
        match self {
            FormulaError::UnknownToken { location, .. }
            | FormulaError::UnexpectedEnd { location }
            | FormulaError::InvalidReference { location, .. }
            | FormulaError::UnclosedParen { location, .. }
            | FormulaError::UnexpectedToken { location, .. }
            | FormulaError::InvalidCloneDirection { location, .. }
            | FormulaError::CloneOutOfBounds { location, .. }
            | FormulaError::RebaseOutOfBounds { location, .. }
            | FormulaError::ReferenceOutOfBounds { location, .. }
            | FormulaError::CircularDependency { location, .. }
            | FormulaError::TextInArithmetic { location, .. } => Some(location),
            FormulaError::Internal(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn loc(row: usize, col: usize) -> Location {
        Location::new(Arc::from("in.txt"), row, col)
    }

    #[test]
    fn test_type_error_names_both_cells() {
        let err = FormulaError::TextInArithmetic {
            location: loc(1, 9),
            target: loc(1, 1),
        };
        assert_eq!(
            err.to_string(),
            "in.txt:1:9: ERROR: text cells may not participate in math expressions\n\
             in.txt:1:1: NOTE: the text cell is located here"
        );
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_circular_with_and_without_origin() {
        let bare = FormulaError::CircularDependency {
            location: loc(2, 3),
            origin: None,
        };
        assert_eq!(
            bare.to_string(),
            "in.txt:2:3: ERROR: circular dependency is detected!"
        );

        let noted = FormulaError::CircularDependency {
            location: loc(2, 3),
            origin: Some(loc(4, 5)),
        };
        assert!(noted
            .to_string()
            .ends_with("in.txt:4:5: NOTE: the dependency is requested here"));
        assert_eq!(noted.kind(), ErrorKind::Semantic);
        assert_eq!(noted.location(), Some(&loc(2, 3)));
    }

    #[test]
    fn test_internal_has_no_location() {
        let err = FormulaError::Internal("boom");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.location().is_none());
    }
}

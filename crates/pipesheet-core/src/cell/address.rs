//! Cell address and direction types

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A0", "C12")
///
/// Formula references use a single uppercase column letter followed by a row
/// number. Both the row and the column are 0-based, so `A0` is the top-left
/// cell and `B3` is the second column of the fourth row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based, A=0, B=1, ..., Z=25)
    pub col: usize,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Parse a cell address from reference notation
    ///
    /// # Examples
    /// ```
    /// use pipesheet_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A0").unwrap();
    /// assert_eq!(addr.row, 0);
    /// assert_eq!(addr.col, 0);
    ///
    /// let addr = CellAddress::parse("C12").unwrap();
    /// assert_eq!(addr.row, 12);
    /// assert_eq!(addr.col, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let mut chars = s.chars();

        let col = match chars.next() {
            Some(c) if c.is_ascii_uppercase() => (c as u8 - b'A') as usize,
            _ => {
                return Err(Error::InvalidAddress(
                    "cell reference must start with capital letter",
                ))
            }
        };

        let row_str = chars.as_str();
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(
                "cell reference must have an integer as the row number",
            ));
        }

        let row: usize = row_str.parse().map_err(|_| {
            Error::InvalidAddress("cell reference must have an integer as the row number")
        })?;

        Ok(Self { row, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    ///
    /// Only `A`..=`Z` can be written in a formula, but clone rebasing may move
    /// a reference past `Z`, and diagnostics still need to name it.
    pub fn column_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// The adjacent address in `direction`, or `None` when that would cross
    /// the top or left edge.
    pub fn neighbor(&self, direction: Direction) -> Option<CellAddress> {
        let (row, col) = match direction {
            Direction::Left => (Some(self.row), self.col.checked_sub(1)),
            Direction::Right => (Some(self.row), self.col.checked_add(1)),
            Direction::Up => (self.row.checked_sub(1), Some(self.col)),
            Direction::Down => (self.row.checked_add(1), Some(self.col)),
        };
        Some(CellAddress::new(row?, col?))
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Direction a clone cell copies its content from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Parse a clone marker (`<`, `>`, `^` or `v`)
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "<" => Some(Direction::Left),
            ">" => Some(Direction::Right),
            "^" => Some(Direction::Up),
            "v" => Some(Direction::Down),
            _ => None,
        }
    }

    /// The marker character for this direction
    pub fn marker(self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Right => '>',
            Direction::Up => '^',
            Direction::Down => 'v',
        }
    }

    /// The direction pointing the other way
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

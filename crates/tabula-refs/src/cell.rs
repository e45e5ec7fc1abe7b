use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::coord::{ColumnRef, RefParseError, RowRef};

/// A reference to a single cell, e.g. `B2` or `$B$2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: ColumnRef,
    pub row: RowRef,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[must_use]
    pub const fn new(column: ColumnRef, row: RowRef) -> Self {
        Self { column, row }
    }

    /// Construct a relative cell reference from 0-indexed coordinates.
    #[must_use]
    pub const fn at(column: u32, row: u32) -> Self {
        Self {
            column: ColumnRef::new(column),
            row: RowRef::new(row),
        }
    }

    /// The same cell with both coordinates relative.
    #[must_use]
    pub const fn to_relative(self) -> Self {
        Self {
            column: self.column.to_relative(),
            row: self.row.to_relative(),
        }
    }

    /// The same cell with both coordinates absolute.
    #[must_use]
    pub const fn to_absolute(self) -> Self {
        Self {
            column: self.column.to_absolute(),
            row: self.row.to_absolute(),
        }
    }

    /// The same cell in a different column.
    #[must_use]
    pub const fn with_column(self, column: ColumnRef) -> Self {
        Self {
            column,
            row: self.row,
        }
    }

    /// The same cell in a different row.
    #[must_use]
    pub const fn with_row(self, row: RowRef) -> Self {
        Self {
            column: self.column,
            row,
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl std::str::FromStr for CellRef {
    type Err = RefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RefParseError::Empty);
        }

        // Column body: optional `$` then letters.
        let bytes = s.as_bytes();
        let mut idx = 0usize;
        if bytes.first() == Some(&b'$') {
            idx += 1;
        }
        let letters_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_alphabetic() {
            idx += 1;
        }
        if idx == letters_start {
            return Err(RefParseError::MissingColumn);
        }
        let column = ColumnRef::parse_body(&s[..idx])?;

        // Row body: optional `$` then digits, nothing after.
        let row_start = idx;
        if bytes.get(idx) == Some(&b'$') {
            idx += 1;
        }
        let digits_start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if idx == digits_start {
            return Err(RefParseError::MissingRow);
        }
        if idx != bytes.len() {
            return Err(RefParseError::TrailingCharacters);
        }
        let row = RowRef::parse_body(&s[row_start..])?;

        Ok(Self { column, row })
    }
}

impl Serialize for CellRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

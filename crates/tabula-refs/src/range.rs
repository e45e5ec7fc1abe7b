use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::cell::CellRef;
use crate::coord::{ColumnRef, RefParseError, RowRef, MAX_COLUMNS, MAX_ROWS};

/// Errors that can occur when parsing a range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("empty range")]
    Empty,
    #[error("invalid reference in range: {0}")]
    Ref(#[from] RefParseError),
}

/// A rectangular, inclusive cell range.
///
/// Always normalized per axis so that `begin.column <= end.column` and
/// `begin.row <= end.row` by index; reference kinds travel with their
/// coordinate when endpoints are swapped. The whole-grid range has the
/// shorthand text form `*`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub begin: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// The whole grid, `A1` to the bottom-right corner.
    pub const ALL: CellRange = CellRange {
        begin: CellRef::at(0, 0),
        end: CellRef::at(MAX_COLUMNS - 1, MAX_ROWS - 1),
    };

    /// Construct a new range, normalizing each axis if needed.
    #[must_use]
    pub const fn new(a: CellRef, b: CellRef) -> Self {
        let begin_column = if a.column.index <= b.column.index {
            a.column
        } else {
            b.column
        };
        let end_column = if a.column.index <= b.column.index {
            b.column
        } else {
            a.column
        };
        let begin_row = if a.row.index <= b.row.index { a.row } else { b.row };
        let end_row = if a.row.index <= b.row.index { b.row } else { a.row };
        Self {
            begin: CellRef::new(begin_column, begin_row),
            end: CellRef::new(end_column, end_row),
        }
    }

    /// The range covering exactly one cell.
    #[must_use]
    pub const fn unit(cell: CellRef) -> Self {
        Self {
            begin: cell,
            end: cell,
        }
    }

    /// Returns true if the range is exactly one cell (by grid position).
    #[must_use]
    pub const fn is_single_cell(&self) -> bool {
        self.begin.column.index == self.end.column.index
            && self.begin.row.index == self.end.row.index
    }

    /// Returns true if this is the whole-grid range.
    #[must_use]
    pub const fn is_all_cells(&self) -> bool {
        self.begin.column.index == 0
            && self.begin.row.index == 0
            && self.end.column.index == MAX_COLUMNS - 1
            && self.end.row.index == MAX_ROWS - 1
    }

    /// Number of columns in the range.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.end.column.index - self.begin.column.index + 1
    }

    /// Number of rows in the range.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.end.row.index - self.begin.row.index + 1
    }

    /// Total cell count. The whole grid exceeds `u32::MAX`.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Returns true if `cell` lies within this range (by grid position).
    #[must_use]
    pub const fn contains(&self, cell: CellRef) -> bool {
        cell.column.index >= self.begin.column.index
            && cell.column.index <= self.end.column.index
            && cell.row.index >= self.begin.row.index
            && cell.row.index <= self.end.row.index
    }

    /// Returns true if `other` is fully inside this range.
    #[must_use]
    pub const fn contains_range(&self, other: &CellRange) -> bool {
        self.contains(other.begin) && self.contains(other.end)
    }

    /// Returns true if the two ranges share at least one cell.
    #[must_use]
    pub const fn intersects(&self, other: &CellRange) -> bool {
        self.begin.column.index <= other.end.column.index
            && other.begin.column.index <= self.end.column.index
            && self.begin.row.index <= other.end.row.index
            && other.begin.row.index <= self.end.row.index
    }

    /// The column span of this range.
    #[must_use]
    pub const fn columns(&self) -> ColumnRange {
        ColumnRange {
            begin: self.begin.column,
            end: self.end.column,
        }
    }

    /// The row span of this range.
    #[must_use]
    pub const fn rows(&self) -> RowRange {
        RowRange {
            begin: self.begin.row,
            end: self.end.row,
        }
    }

    /// Iterate all cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = CellRef> {
        let columns = self.begin.column.index..=self.end.column.index;
        (self.begin.row.index..=self.end.row.index)
            .flat_map(move |row| columns.clone().map(move |column| CellRef::at(column, row)))
    }

    /// The same range with all coordinates relative.
    #[must_use]
    pub const fn to_relative(self) -> Self {
        Self {
            begin: self.begin.to_relative(),
            end: self.end.to_relative(),
        }
    }
}

impl From<CellRef> for CellRange {
    fn from(cell: CellRef) -> Self {
        Self::unit(cell)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all_cells() {
            f.write_str("*")
        } else if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

impl std::str::FromStr for CellRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }
        if s == "*" {
            return Ok(Self::ALL);
        }
        match s.split_once(':') {
            None => Ok(Self::unit(s.parse::<CellRef>()?)),
            Some((a, b)) => Ok(Self::new(a.parse::<CellRef>()?, b.parse::<CellRef>()?)),
        }
    }
}

impl Serialize for CellRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

/// An inclusive range of columns, e.g. `B:D`.
///
/// Normalized so `begin.index <= end.index`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRange {
    pub begin: ColumnRef,
    pub end: ColumnRef,
}

impl ColumnRange {
    /// Construct a new range, normalizing if needed.
    #[must_use]
    pub const fn new(a: ColumnRef, b: ColumnRef) -> Self {
        if a.index <= b.index {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    /// The range covering exactly one column.
    #[must_use]
    pub const fn unit(column: ColumnRef) -> Self {
        Self {
            begin: column,
            end: column,
        }
    }

    /// Returns true if the range is exactly one column (by grid position).
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.begin.index == self.end.index
    }

    /// Number of columns in the range.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.end.index - self.begin.index + 1
    }

    /// Returns true if `column` lies within this range (by grid position).
    #[must_use]
    pub const fn contains(&self, column: ColumnRef) -> bool {
        column.index >= self.begin.index && column.index <= self.end.index
    }

    /// Returns true if the two ranges share at least one column.
    #[must_use]
    pub const fn intersects(&self, other: &ColumnRange) -> bool {
        self.begin.index <= other.end.index && other.begin.index <= self.end.index
    }

    /// Iterate the columns in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnRef> {
        (self.begin.index..=self.end.index).map(ColumnRef::new)
    }
}

impl From<ColumnRef> for ColumnRange {
    fn from(column: ColumnRef) -> Self {
        Self::unit(column)
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

impl std::str::FromStr for ColumnRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }
        match s.split_once(':') {
            None => Ok(Self::unit(s.parse::<ColumnRef>()?)),
            Some((a, b)) => Ok(Self::new(a.parse::<ColumnRef>()?, b.parse::<ColumnRef>()?)),
        }
    }
}

impl Serialize for ColumnRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColumnRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

/// An inclusive range of rows, e.g. `2:4`.
///
/// Normalized so `begin.index <= end.index`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowRange {
    pub begin: RowRef,
    pub end: RowRef,
}

impl RowRange {
    /// Construct a new range, normalizing if needed.
    #[must_use]
    pub const fn new(a: RowRef, b: RowRef) -> Self {
        if a.index <= b.index {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    /// The range covering exactly one row.
    #[must_use]
    pub const fn unit(row: RowRef) -> Self {
        Self { begin: row, end: row }
    }

    /// Returns true if the range is exactly one row (by grid position).
    #[must_use]
    pub const fn is_single(&self) -> bool {
        self.begin.index == self.end.index
    }

    /// Number of rows in the range.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.end.index - self.begin.index + 1
    }

    /// Returns true if `row` lies within this range (by grid position).
    #[must_use]
    pub const fn contains(&self, row: RowRef) -> bool {
        row.index >= self.begin.index && row.index <= self.end.index
    }

    /// Returns true if the two ranges share at least one row.
    #[must_use]
    pub const fn intersects(&self, other: &RowRange) -> bool {
        self.begin.index <= other.end.index && other.begin.index <= self.end.index
    }

    /// Iterate the rows in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RowRef> {
        (self.begin.index..=self.end.index).map(RowRef::new)
    }
}

impl From<RowRef> for RowRange {
    fn from(row: RowRef) -> Self {
        Self::unit(row)
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin == self.end {
            write!(f, "{}", self.begin)
        } else {
            write!(f, "{}:{}", self.begin, self.end)
        }
    }
}

impl std::str::FromStr for RowRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RangeParseError::Empty);
        }
        match s.split_once(':') {
            None => Ok(Self::unit(s.parse::<RowRef>()?)),
            Some((a, b)) => Ok(Self::new(a.parse::<RowRef>()?, b.parse::<RowRef>()?)),
        }
    }
}

impl Serialize for RowRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RowRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

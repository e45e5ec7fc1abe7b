use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::CellRef;
use crate::coord::{ColumnRef, RowRef};
use crate::label::LabelName;
use crate::range::{CellRange, ColumnRange, RowRange};

/// Errors that can occur when parsing untyped selection text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionParseError {
    #[error("empty selection")]
    Empty,
    #[error("unrecognized selection '{0}'")]
    Unrecognized(String),
    #[error("mismatched range endpoints '{0}'")]
    MismatchedRange(String),
}

/// The shape of a selection, without its coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    Cell,
    Column,
    Row,
    CellRange,
    ColumnRange,
    RowRange,
    Label,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SelectionKind::Cell => "cell",
            SelectionKind::Column => "column",
            SelectionKind::Row => "row",
            SelectionKind::CellRange => "cell-range",
            SelectionKind::ColumnRange => "column-range",
            SelectionKind::RowRange => "row-range",
            SelectionKind::Label => "label",
        })
    }
}

/// The navigation family a selection belongs to.
///
/// Scalars and ranges on the same axis extend into each other; labels
/// belong to no family and cannot be extended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionFamily {
    Cells,
    Columns,
    Rows,
}

/// A grid selection target.
///
/// Serialized in tagged form, e.g. `{"type":"cell","value":"B2"}` or
/// `{"type":"column-range","value":"B:D"}`. Untyped text (as used in URL
/// fragments) is resolved by [`Selection::from_str`] with cell taking
/// precedence over column, column over row, and row over label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Selection {
    Cell(CellRef),
    Column(ColumnRef),
    Row(RowRef),
    CellRange(CellRange),
    ColumnRange(ColumnRange),
    RowRange(RowRange),
    Label(LabelName),
}

impl Selection {
    /// The shape of this selection, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> SelectionKind {
        match self {
            Selection::Cell(_) => SelectionKind::Cell,
            Selection::Column(_) => SelectionKind::Column,
            Selection::Row(_) => SelectionKind::Row,
            Selection::CellRange(_) => SelectionKind::CellRange,
            Selection::ColumnRange(_) => SelectionKind::ColumnRange,
            Selection::RowRange(_) => SelectionKind::RowRange,
            Selection::Label(_) => SelectionKind::Label,
        }
    }

    /// The navigation family, or `None` for labels.
    #[must_use]
    pub const fn family(&self) -> Option<SelectionFamily> {
        match self {
            Selection::Cell(_) | Selection::CellRange(_) => Some(SelectionFamily::Cells),
            Selection::Column(_) | Selection::ColumnRange(_) => Some(SelectionFamily::Columns),
            Selection::Row(_) | Selection::RowRange(_) => Some(SelectionFamily::Rows),
            Selection::Label(_) => None,
        }
    }

    /// Returns true if this selection is a range shape (as opposed to a
    /// scalar or a label).
    #[must_use]
    pub const fn is_range(&self) -> bool {
        matches!(
            self,
            Selection::CellRange(_) | Selection::ColumnRange(_) | Selection::RowRange(_)
        )
    }
}

impl From<CellRef> for Selection {
    fn from(cell: CellRef) -> Self {
        Selection::Cell(cell)
    }
}

impl From<ColumnRef> for Selection {
    fn from(column: ColumnRef) -> Self {
        Selection::Column(column)
    }
}

impl From<RowRef> for Selection {
    fn from(row: RowRef) -> Self {
        Selection::Row(row)
    }
}

impl From<CellRange> for Selection {
    fn from(range: CellRange) -> Self {
        Selection::CellRange(range)
    }
}

impl From<ColumnRange> for Selection {
    fn from(range: ColumnRange) -> Self {
        Selection::ColumnRange(range)
    }
}

impl From<RowRange> for Selection {
    fn from(range: RowRange) -> Self {
        Selection::RowRange(range)
    }
}

impl From<LabelName> for Selection {
    fn from(label: LabelName) -> Self {
        Selection::Label(label)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Cell(cell) => write!(f, "{cell}"),
            Selection::Column(column) => write!(f, "{column}"),
            Selection::Row(row) => write!(f, "{row}"),
            Selection::CellRange(range) => write!(f, "{range}"),
            Selection::ColumnRange(range) => write!(f, "{range}"),
            Selection::RowRange(range) => write!(f, "{range}"),
            Selection::Label(label) => write!(f, "{label}"),
        }
    }
}

impl std::str::FromStr for Selection {
    type Err = SelectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SelectionParseError::Empty);
        }
        if s == "*" {
            return Ok(Selection::CellRange(CellRange::ALL));
        }
        if let Some((a, b)) = s.split_once(':') {
            return parse_range(s, a, b);
        }
        if let Ok(cell) = s.parse::<CellRef>() {
            return Ok(Selection::Cell(cell));
        }
        if let Ok(column) = s.parse::<ColumnRef>() {
            return Ok(Selection::Column(column));
        }
        if let Ok(row) = s.parse::<RowRef>() {
            return Ok(Selection::Row(row));
        }
        if let Ok(label) = s.parse::<LabelName>() {
            return Ok(Selection::Label(label));
        }
        Err(SelectionParseError::Unrecognized(s.to_string()))
    }
}

fn parse_range(whole: &str, a: &str, b: &str) -> Result<Selection, SelectionParseError> {
    if let (Ok(begin), Ok(end)) = (a.parse::<CellRef>(), b.parse::<CellRef>()) {
        return Ok(Selection::CellRange(CellRange::new(begin, end)));
    }
    if let (Ok(begin), Ok(end)) = (a.parse::<ColumnRef>(), b.parse::<ColumnRef>()) {
        return Ok(Selection::ColumnRange(ColumnRange::new(begin, end)));
    }
    if let (Ok(begin), Ok(end)) = (a.parse::<RowRef>(), b.parse::<RowRef>()) {
        return Ok(Selection::RowRange(RowRange::new(begin, end)));
    }
    // Both halves valid on their own but of different shapes, e.g. `B:2`.
    let half_ok = |text: &str| {
        text.parse::<CellRef>().is_ok()
            || text.parse::<ColumnRef>().is_ok()
            || text.parse::<RowRef>().is_ok()
    };
    if half_ok(a) && half_ok(b) {
        return Err(SelectionParseError::MismatchedRange(whole.to_string()));
    }
    Err(SelectionParseError::Unrecognized(whole.to_string()))
}

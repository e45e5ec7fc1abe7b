use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use tabula_refs::{CellRange, CellRef, ColumnRef, RangeParseError, RowRef, Selection};

/// Errors from windows construction and parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WindowsError {
    #[error("windows overlap: {first} and {second}")]
    Overlap {
        first: CellRange,
        second: CellRange,
    },
    #[error("invalid window range: {0}")]
    Range(#[from] RangeParseError),
}

/// The set of cell ranges a viewport currently renders.
///
/// Ranges never overlap (construction rejects the first offending pair)
/// and are held in row-major order of their top-left corners. The empty
/// set means "unconstrained": nothing is excluded. Text and JSON form:
/// comma-joined ranges (`"A1:B2,C3:D4"`), with `*` for the all-cells
/// sentinel and the empty string for no windows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ViewportWindows {
    ranges: Vec<CellRange>,
}

impl ViewportWindows {
    /// Build a window set, rejecting overlapping ranges.
    pub fn new(ranges: impl IntoIterator<Item = CellRange>) -> Result<Self, WindowsError> {
        let ranges: Vec<CellRange> = ranges.into_iter().collect();
        for (index, first) in ranges.iter().enumerate() {
            for second in &ranges[index + 1..] {
                if first.intersects(second) {
                    return Err(WindowsError::Overlap {
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(Self::from_disjoint(ranges))
    }

    /// Build from ranges already known to be pairwise disjoint.
    pub(crate) fn from_disjoint(mut ranges: Vec<CellRange>) -> Self {
        ranges.sort_unstable_by_key(|range| {
            (
                range.begin.row.index,
                range.begin.column.index,
                range.end.row.index,
                range.end.column.index,
            )
        });
        Self { ranges }
    }

    /// The empty, unconstrained window set.
    #[must_use]
    pub const fn empty() -> Self {
        Self { ranges: Vec::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The ranges in row-major order.
    #[must_use]
    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    /// Top-left cell of the first range, if any.
    #[must_use]
    pub fn home(&self) -> Option<CellRef> {
        self.ranges.first().map(|range| range.begin)
    }

    /// The last range in iteration order.
    #[must_use]
    pub fn last(&self) -> Option<&CellRange> {
        self.ranges.last()
    }

    /// Smallest single range enclosing every window.
    #[must_use]
    pub fn bounds(&self) -> Option<CellRange> {
        let first = *self.ranges.first()?;
        Some(self.ranges.iter().skip(1).fold(first, |bounds, range| {
            let begin = CellRef::at(
                bounds.begin.column.index.min(range.begin.column.index),
                bounds.begin.row.index.min(range.begin.row.index),
            );
            let end = CellRef::at(
                bounds.end.column.index.max(range.end.column.index),
                bounds.end.row.index.max(range.end.row.index),
            );
            CellRange::new(begin, end)
        }))
    }

    /// Total rendered cell count. The all-cells sentinel contributes the
    /// grid's theoretical maximum.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.ranges.iter().map(CellRange::count).sum()
    }

    /// All rendered cells in row-major order across the whole set.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        let rows = self
            .bounds()
            .map(|bounds| bounds.begin.row.index..=bounds.end.row.index);
        rows.into_iter().flatten().flat_map(move |row| {
            let mut segments: Vec<(u32, u32)> = self
                .ranges
                .iter()
                .filter(|range| {
                    range.begin.row.index <= row && row <= range.end.row.index
                })
                .map(|range| (range.begin.column.index, range.end.column.index))
                .collect();
            segments.sort_unstable();
            segments
                .into_iter()
                .flat_map(move |(begin, end)| (begin..=end).map(move |column| CellRef::at(column, row)))
        })
    }

    /// The rendered columns, ascending and de-duplicated.
    pub fn columns(&self) -> impl Iterator<Item = ColumnRef> {
        let intervals = merge_intervals(
            self.ranges
                .iter()
                .map(|range| (range.begin.column.index, range.end.column.index)),
        );
        intervals
            .into_iter()
            .flat_map(|(begin, end)| (begin..=end).map(ColumnRef::new))
    }

    /// The rendered rows, ascending and de-duplicated.
    pub fn rows(&self) -> impl Iterator<Item = RowRef> {
        let intervals = merge_intervals(
            self.ranges
                .iter()
                .map(|range| (range.begin.row.index, range.end.row.index)),
        );
        intervals
            .into_iter()
            .flat_map(|(begin, end)| (begin..=end).map(RowRef::new))
    }

    /// True iff every cell of `range` is covered by the union of windows.
    ///
    /// Coverage may be stitched together from several windows; a range
    /// half inside one window and half inside another still counts.
    #[must_use]
    pub fn contains_all(&self, range: &CellRange) -> bool {
        let mut uncovered = vec![*range];
        for window in &self.ranges {
            if uncovered.is_empty() {
                break;
            }
            uncovered = uncovered
                .iter()
                .flat_map(|piece| subtract(piece, window))
                .collect();
        }
        uncovered.is_empty()
    }

    /// Visibility predicate for a selection.
    ///
    /// The empty window set constrains nothing, so everything tests true.
    /// Labels have no grid position and always test true. Grid selections
    /// test true iff they intersect the rendered area.
    #[must_use]
    pub fn test(&self, selection: &Selection) -> bool {
        if self.ranges.is_empty() {
            return true;
        }
        match selection {
            Selection::Cell(cell) => self.ranges.iter().any(|range| range.contains(*cell)),
            Selection::CellRange(target) => {
                self.ranges.iter().any(|range| range.intersects(target))
            }
            Selection::Column(column) => self
                .ranges
                .iter()
                .any(|range| range.columns().contains(*column)),
            Selection::ColumnRange(target) => self
                .ranges
                .iter()
                .any(|range| range.columns().intersects(target)),
            Selection::Row(row) => self.ranges.iter().any(|range| range.rows().contains(*row)),
            Selection::RowRange(target) => {
                self.ranges.iter().any(|range| range.rows().intersects(target))
            }
            Selection::Label(_) => true,
        }
    }
}

/// Merge possibly-touching index intervals into a minimal ascending set.
fn merge_intervals(intervals: impl Iterator<Item = (u32, u32)>) -> Vec<(u32, u32)> {
    let mut intervals: Vec<(u32, u32)> = intervals.collect();
    intervals.sort_unstable();
    let mut merged: Vec<(u32, u32)> = Vec::with_capacity(intervals.len());
    for (begin, end) in intervals {
        match merged.last_mut() {
            Some((_, last_end)) if begin <= last_end.saturating_add(1) => {
                *last_end = (*last_end).max(end);
            }
            _ => merged.push((begin, end)),
        }
    }
    merged
}

/// `piece` minus `window`, as up to four disjoint rectangles.
fn subtract(piece: &CellRange, window: &CellRange) -> Vec<CellRange> {
    if !piece.intersects(window) {
        return vec![*piece];
    }
    let top = piece.begin.row.index;
    let bottom = piece.end.row.index;
    let left = piece.begin.column.index;
    let right = piece.end.column.index;
    let cut_top = window.begin.row.index.max(top);
    let cut_bottom = window.end.row.index.min(bottom);
    let cut_left = window.begin.column.index.max(left);
    let cut_right = window.end.column.index.min(right);

    let mut remainder = Vec::new();
    if cut_top > top {
        remainder.push(CellRange::new(
            CellRef::at(left, top),
            CellRef::at(right, cut_top - 1),
        ));
    }
    if cut_bottom < bottom {
        remainder.push(CellRange::new(
            CellRef::at(left, cut_bottom + 1),
            CellRef::at(right, bottom),
        ));
    }
    if cut_left > left {
        remainder.push(CellRange::new(
            CellRef::at(left, cut_top),
            CellRef::at(cut_left - 1, cut_bottom),
        ));
    }
    if cut_right < right {
        remainder.push(CellRange::new(
            CellRef::at(cut_right + 1, cut_top),
            CellRef::at(right, cut_bottom),
        ));
    }
    remainder
}

impl fmt::Display for ViewportWindows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, range) in self.ranges.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ViewportWindows {
    type Err = WindowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let ranges = s
            .split(',')
            .map(|part| part.parse::<CellRange>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(ranges)
    }
}

impl Serialize for ViewportWindows {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ViewportWindows {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

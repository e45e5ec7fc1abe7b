use std::collections::{HashMap, HashSet};

use tabula_refs::{CellRange, CellRef, ColumnRef, RowRef, MAX_COLUMNS, MAX_ROWS};

use crate::rectangle::ViewportRectangle;
use crate::windows::ViewportWindows;

/// Sheet geometry the navigation engine reads while stepping.
///
/// Implementors supply visibility and sizing; the stepping and pixel-walk
/// algorithms are provided. All methods must be pure: the engine may call
/// them any number of times per update.
pub trait NavigationContext {
    fn is_column_hidden(&self, column: ColumnRef) -> bool;

    fn is_row_hidden(&self, row: RowRef) -> bool;

    /// Rendered width of a visible column, in pixels.
    fn column_width(&self, column: ColumnRef) -> f64;

    /// Rendered height of a visible row, in pixels.
    fn row_height(&self, row: RowRef) -> f64;

    /// The cell ranges the given rectangle currently renders.
    fn windows(&self, rectangle: &ViewportRectangle) -> ViewportWindows;

    /// Nearest visible column left of `from`, or `None` at the grid edge.
    fn left_column(&self, from: ColumnRef) -> Option<ColumnRef> {
        let mut cursor = from;
        loop {
            cursor = cursor.left()?;
            if !self.is_column_hidden(cursor) {
                return Some(cursor);
            }
        }
    }

    /// Nearest visible column right of `from`, or `None` at the grid edge.
    fn right_column(&self, from: ColumnRef) -> Option<ColumnRef> {
        let mut cursor = from;
        loop {
            cursor = cursor.right()?;
            if !self.is_column_hidden(cursor) {
                return Some(cursor);
            }
        }
    }

    /// Nearest visible row above `from`, or `None` at the grid edge.
    fn up_row(&self, from: RowRef) -> Option<RowRef> {
        let mut cursor = from;
        loop {
            cursor = cursor.up()?;
            if !self.is_row_hidden(cursor) {
                return Some(cursor);
            }
        }
    }

    /// Nearest visible row below `from`, or `None` at the grid edge.
    fn down_row(&self, from: RowRef) -> Option<RowRef> {
        let mut cursor = from;
        loop {
            cursor = cursor.down()?;
            if !self.is_row_hidden(cursor) {
                return Some(cursor);
            }
        }
    }

    /// Walk left until the visible widths consumed meet or exceed `pixels`.
    ///
    /// Hidden columns are skipped without being measured. The landing
    /// column is the last one consumed, clamped at the grid edge; `None`
    /// when not a single visible step was possible.
    fn left_pixels(&self, from: ColumnRef, pixels: u32) -> Option<ColumnRef> {
        let target = f64::from(pixels);
        let mut landed = from;
        let mut total = 0.0;
        while total < target {
            match self.left_column(landed) {
                Some(next) => {
                    landed = next;
                    total += self.column_width(next);
                }
                None => break,
            }
        }
        (landed != from).then_some(landed)
    }

    /// Walk right until the visible widths consumed meet or exceed `pixels`.
    fn right_pixels(&self, from: ColumnRef, pixels: u32) -> Option<ColumnRef> {
        let target = f64::from(pixels);
        let mut landed = from;
        let mut total = 0.0;
        while total < target {
            match self.right_column(landed) {
                Some(next) => {
                    landed = next;
                    total += self.column_width(next);
                }
                None => break,
            }
        }
        (landed != from).then_some(landed)
    }

    /// Walk up until the visible heights consumed meet or exceed `pixels`.
    fn up_pixels(&self, from: RowRef, pixels: u32) -> Option<RowRef> {
        let target = f64::from(pixels);
        let mut landed = from;
        let mut total = 0.0;
        while total < target {
            match self.up_row(landed) {
                Some(next) => {
                    landed = next;
                    total += self.row_height(next);
                }
                None => break,
            }
        }
        (landed != from).then_some(landed)
    }

    /// Walk down until the visible heights consumed meet or exceed `pixels`.
    fn down_pixels(&self, from: RowRef, pixels: u32) -> Option<RowRef> {
        let target = f64::from(pixels);
        let mut landed = from;
        let mut total = 0.0;
        while total < target {
            match self.down_row(landed) {
                Some(next) => {
                    landed = next;
                    total += self.row_height(next);
                }
                None => break,
            }
        }
        (landed != from).then_some(landed)
    }
}

/// Geometry-backed [`NavigationContext`] with uniform defaults, per-index
/// size overrides and hidden sets. Serves tests and simple hosts.
#[derive(Clone, Debug)]
pub struct BasicNavigationContext {
    default_column_width: f64,
    default_row_height: f64,
    column_widths: HashMap<u32, f64>,
    row_heights: HashMap<u32, f64>,
    hidden_columns: HashSet<u32>,
    hidden_rows: HashSet<u32>,
}

impl BasicNavigationContext {
    pub const DEFAULT_COLUMN_WIDTH: f64 = 100.0;
    pub const DEFAULT_ROW_HEIGHT: f64 = 30.0;

    #[must_use]
    pub fn new(default_column_width: f64, default_row_height: f64) -> Self {
        Self {
            default_column_width,
            default_row_height,
            column_widths: HashMap::new(),
            row_heights: HashMap::new(),
            hidden_columns: HashSet::new(),
            hidden_rows: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_column_width(mut self, column: ColumnRef, width: f64) -> Self {
        self.column_widths.insert(column.index, width);
        self
    }

    #[must_use]
    pub fn with_row_height(mut self, row: RowRef, height: f64) -> Self {
        self.row_heights.insert(row.index, height);
        self
    }

    #[must_use]
    pub fn with_hidden_column(mut self, column: ColumnRef) -> Self {
        self.hidden_columns.insert(column.index);
        self
    }

    #[must_use]
    pub fn with_hidden_row(mut self, row: RowRef) -> Self {
        self.hidden_rows.insert(row.index);
        self
    }
}

impl Default for BasicNavigationContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COLUMN_WIDTH, Self::DEFAULT_ROW_HEIGHT)
    }
}

impl NavigationContext for BasicNavigationContext {
    fn is_column_hidden(&self, column: ColumnRef) -> bool {
        self.hidden_columns.contains(&column.index)
    }

    fn is_row_hidden(&self, row: RowRef) -> bool {
        self.hidden_rows.contains(&row.index)
    }

    fn column_width(&self, column: ColumnRef) -> f64 {
        self.column_widths
            .get(&column.index)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    fn row_height(&self, row: RowRef) -> f64 {
        self.row_heights
            .get(&row.index)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    /// Fill the rectangle from its home cell, column by column and row by
    /// row; a partially visible trailing column/row is included. Hidden
    /// indices split the fill into runs, so the result may be several
    /// disjoint ranges.
    fn windows(&self, rectangle: &ViewportRectangle) -> ViewportWindows {
        let home = rectangle.home();
        let column_runs = fill_runs(
            home.column.index,
            MAX_COLUMNS,
            rectangle.width(),
            |index| self.hidden_columns.contains(&index),
            |index| self.column_width(ColumnRef::new(index)),
        );
        let row_runs = fill_runs(
            home.row.index,
            MAX_ROWS,
            rectangle.height(),
            |index| self.hidden_rows.contains(&index),
            |index| self.row_height(RowRef::new(index)),
        );
        let mut ranges = Vec::with_capacity(column_runs.len() * row_runs.len());
        for &(row_begin, row_end) in &row_runs {
            for &(column_begin, column_end) in &column_runs {
                ranges.push(CellRange::new(
                    CellRef::at(column_begin, row_begin),
                    CellRef::at(column_end, row_end),
                ));
            }
        }
        ViewportWindows::from_disjoint(ranges)
    }
}

/// Consume visible indices from `start` until their sizes meet or exceed
/// `extent`, grouping consecutive survivors into runs.
fn fill_runs(
    start: u32,
    limit: u32,
    extent: f64,
    mut hidden: impl FnMut(u32) -> bool,
    mut size: impl FnMut(u32) -> f64,
) -> Vec<(u32, u32)> {
    let mut runs: Vec<(u32, u32)> = Vec::new();
    let mut total = 0.0;
    let mut index = start;
    while index < limit && total < extent {
        if !hidden(index) {
            match runs.last_mut() {
                Some((_, end)) if *end + 1 == index => *end = index,
                _ => runs.push((index, index)),
            }
            total += size(index);
        }
        index += 1;
    }
    runs
}

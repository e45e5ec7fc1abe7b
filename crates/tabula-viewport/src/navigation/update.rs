use tabula_refs::{
    CellRange, CellRef, ColumnRange, ColumnRef, RowRange, RowRef, Selection, SelectionFamily,
    MAX_COLUMNS, MAX_ROWS,
};

use crate::anchor::Anchor;
use crate::anchored::AnchoredSelection;
use crate::context::NavigationContext;
use crate::navigation::{Amount, Axis, Navigation};
use crate::rectangle::ViewportRectangle;
use crate::viewport::Viewport;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }
}

impl Viewport {
    /// Apply one navigation command against the given sheet geometry.
    ///
    /// Pure: neither `self` nor the context is mutated. A command that can
    /// take no effect (grid boundary, hidden wall, axis-incompatible
    /// selection, label selection) returns the input unchanged. Effective
    /// commands are appended to the navigation log; the log is not
    /// compacted here, [`NavigationList::compact`] is the caller's
    /// canonicalization step.
    ///
    /// [`NavigationList::compact`]: crate::navigation::NavigationList::compact
    #[must_use]
    pub fn update(&self, navigation: Navigation, context: &dyn NavigationContext) -> Viewport {
        match navigation {
            Navigation::Left(amount) => self.apply_move(navigation, Direction::Left, amount, context),
            Navigation::Right(amount) => {
                self.apply_move(navigation, Direction::Right, amount, context)
            }
            Navigation::Up(amount) => self.apply_move(navigation, Direction::Up, amount, context),
            Navigation::Down(amount) => self.apply_move(navigation, Direction::Down, amount, context),
            Navigation::ExtendLeft(amount) => {
                self.apply_extend(navigation, Direction::Left, amount, context)
            }
            Navigation::ExtendRight(amount) => {
                self.apply_extend(navigation, Direction::Right, amount, context)
            }
            Navigation::ExtendUp(amount) => {
                self.apply_extend(navigation, Direction::Up, amount, context)
            }
            Navigation::ExtendDown(amount) => {
                self.apply_extend(navigation, Direction::Down, amount, context)
            }
            Navigation::SelectCell(cell) => {
                self.apply_select(navigation, Selection::Cell(cell), context)
            }
            Navigation::SelectColumn(column) => {
                self.apply_select(navigation, Selection::Column(column), context)
            }
            Navigation::SelectRow(row) => {
                self.apply_select(navigation, Selection::Row(row), context)
            }
            Navigation::ExtendCell(cell) => self.apply_extend_to_cell(navigation, cell, context),
            Navigation::ExtendColumn(column) => {
                self.apply_extend_to_column(navigation, column, context)
            }
            Navigation::ExtendRow(row) => self.apply_extend_to_row(navigation, row, context),
        }
    }

    /// Directional move: step the focused reference, collapsing a range
    /// selection to the scalar at the landing position. Without a
    /// selection the home cell itself moves.
    fn apply_move(
        &self,
        navigation: Navigation,
        direction: Direction,
        amount: Amount,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let Some(anchored) = self.anchored_selection() else {
            let home = self.rectangle().home();
            let moved = match direction.axis() {
                Axis::Horizontal => step_column(context, direction, amount, home.column)
                    .map(|column| home.with_column(column)),
                Axis::Vertical => {
                    step_row(context, direction, amount, home.row).map(|row| home.with_row(row))
                }
            };
            let Some(home) = moved else {
                return self.clone();
            };
            return self
                .clone()
                .with_rectangle(self.rectangle().with_home(home))
                .with_logged(navigation);
        };
        let Some(focused) = anchored.focused() else {
            return self.clone();
        };
        let moved = match (focused, direction.axis()) {
            (Selection::Cell(cell), Axis::Horizontal) => {
                step_column(context, direction, amount, cell.column)
                    .map(|column| Selection::Cell(cell.with_column(column)))
            }
            (Selection::Cell(cell), Axis::Vertical) => {
                step_row(context, direction, amount, cell.row)
                    .map(|row| Selection::Cell(cell.with_row(row)))
            }
            (Selection::Column(column), Axis::Horizontal) => {
                step_column(context, direction, amount, column).map(Selection::Column)
            }
            (Selection::Row(row), Axis::Vertical) => {
                step_row(context, direction, amount, row).map(Selection::Row)
            }
            // Columns do not move vertically, rows do not move horizontally.
            _ => None,
        };
        let Some(selection) = moved else {
            return self.clone();
        };
        let anchored = AnchoredSelection::from_parts(selection, Anchor::None);
        self.with_updated_selection(navigation, anchored, context)
    }

    /// Directional extend: move the anchor-opposite edge, keep the fixed
    /// corner. A scalar grows into a 2-unit range anchored at its original
    /// position; a range that shrinks back to one unit becomes the scalar
    /// again.
    fn apply_extend(
        &self,
        navigation: Navigation,
        direction: Direction,
        amount: Amount,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let Some(anchored) = self.anchored_selection() else {
            return self.clone();
        };
        let anchored = match (anchored.selection(), direction.axis()) {
            (Selection::Cell(cell), Axis::Horizontal) => {
                step_column(context, direction, amount, cell.column)
                    .map(|column| anchored_cells(*cell, cell.with_column(column)))
            }
            (Selection::Cell(cell), Axis::Vertical) => {
                step_row(context, direction, amount, cell.row)
                    .map(|row| anchored_cells(*cell, cell.with_row(row)))
            }
            (Selection::CellRange(range), axis) => {
                let Ok(fixed) = anchored.anchor().cell(range) else {
                    return self.clone();
                };
                let Ok(focused) = anchored.anchor().opposite().cell(range) else {
                    return self.clone();
                };
                let moved = match axis {
                    Axis::Horizontal => step_column(context, direction, amount, focused.column)
                        .map(|column| focused.with_column(column)),
                    Axis::Vertical => step_row(context, direction, amount, focused.row)
                        .map(|row| focused.with_row(row)),
                };
                moved.map(|moved| anchored_cells(fixed, moved))
            }
            (Selection::Column(column), Axis::Horizontal) => {
                step_column(context, direction, amount, *column)
                    .map(|moved| anchored_columns(*column, moved))
            }
            (Selection::ColumnRange(range), Axis::Horizontal) => {
                let Ok(fixed) = anchored.anchor().column(range) else {
                    return self.clone();
                };
                let Ok(focused) = anchored.anchor().opposite().column(range) else {
                    return self.clone();
                };
                step_column(context, direction, amount, focused)
                    .map(|moved| anchored_columns(fixed, moved))
            }
            (Selection::Row(row), Axis::Vertical) => {
                step_row(context, direction, amount, *row).map(|moved| anchored_rows(*row, moved))
            }
            (Selection::RowRange(range), Axis::Vertical) => {
                let Ok(fixed) = anchored.anchor().row(range) else {
                    return self.clone();
                };
                let Ok(focused) = anchored.anchor().opposite().row(range) else {
                    return self.clone();
                };
                step_row(context, direction, amount, focused)
                    .map(|moved| anchored_rows(fixed, moved))
            }
            // Axis-incompatible extends and labels change nothing.
            _ => None,
        };
        let Some(anchored) = anchored else {
            return self.clone();
        };
        self.with_updated_selection(navigation, anchored, context)
    }

    /// Absolute select: unconditionally replaces the anchored selection,
    /// discarding the previous anchor.
    fn apply_select(
        &self,
        navigation: Navigation,
        selection: Selection,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let anchored = AnchoredSelection::from_parts(selection, Anchor::None);
        self.with_updated_selection(navigation, anchored, context)
    }

    /// Extend toward an absolute cell: same family spans from the fixed
    /// corner to the target, anything else behaves like a plain select.
    fn apply_extend_to_cell(
        &self,
        navigation: Navigation,
        target: CellRef,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let fixed = self.anchored_selection().and_then(|anchored| {
            match (anchored.family(), anchored.fixed()) {
                (Some(SelectionFamily::Cells), Some(Selection::Cell(cell))) => Some(cell),
                _ => None,
            }
        });
        let Some(fixed) = fixed else {
            return self.apply_select(navigation, Selection::Cell(target), context);
        };
        self.with_updated_selection(navigation, anchored_cells(fixed, target), context)
    }

    fn apply_extend_to_column(
        &self,
        navigation: Navigation,
        target: ColumnRef,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let fixed = self.anchored_selection().and_then(|anchored| {
            match (anchored.family(), anchored.fixed()) {
                (Some(SelectionFamily::Columns), Some(Selection::Column(column))) => Some(column),
                _ => None,
            }
        });
        let Some(fixed) = fixed else {
            return self.apply_select(navigation, Selection::Column(target), context);
        };
        self.with_updated_selection(navigation, anchored_columns(fixed, target), context)
    }

    fn apply_extend_to_row(
        &self,
        navigation: Navigation,
        target: RowRef,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let fixed = self.anchored_selection().and_then(|anchored| {
            match (anchored.family(), anchored.fixed()) {
                (Some(SelectionFamily::Rows), Some(Selection::Row(row))) => Some(row),
                _ => None,
            }
        });
        let Some(fixed) = fixed else {
            return self.apply_select(navigation, Selection::Row(target), context);
        };
        self.with_updated_selection(navigation, anchored_rows(fixed, target), context)
    }

    /// Install the new selection, relocate home if the focus left the
    /// rendered windows, and log the command.
    fn with_updated_selection(
        &self,
        navigation: Navigation,
        anchored: AnchoredSelection,
        context: &dyn NavigationContext,
    ) -> Viewport {
        let rectangle = self.relocated_rectangle(&anchored, context);
        self.clone()
            .with_rectangle(rectangle)
            .with_anchored_selection(Some(anchored))
            .with_logged(navigation)
    }

    fn with_logged(self, navigation: Navigation) -> Viewport {
        let navigations = self.navigations().clone().with_appended(navigation);
        self.with_navigations(navigations)
    }

    /// Move home by exactly the per-axis delta that brings the focused
    /// cell back inside the rendered windows. Column selections pair with
    /// the home row, row selections with the home column. Empty windows
    /// constrain nothing.
    fn relocated_rectangle(
        &self,
        anchored: &AnchoredSelection,
        context: &dyn NavigationContext,
    ) -> ViewportRectangle {
        let rectangle = self.rectangle();
        let home = rectangle.home();
        let focused = match anchored.focused() {
            Some(Selection::Cell(cell)) => cell,
            Some(Selection::Column(column)) => CellRef::new(column, home.row),
            Some(Selection::Row(row)) => CellRef::new(home.column, row),
            _ => return rectangle,
        };
        let windows = context.windows(&rectangle);
        if windows.test(&Selection::Cell(focused)) {
            return rectangle;
        }
        let Some(bounds) = windows.bounds() else {
            return rectangle;
        };
        let column = relocated_coordinate(
            home.column.index,
            focused.column.index,
            bounds.begin.column.index,
            bounds.end.column.index,
            MAX_COLUMNS,
        );
        let row = relocated_coordinate(
            home.row.index,
            focused.row.index,
            bounds.begin.row.index,
            bounds.end.row.index,
            MAX_ROWS,
        );
        rectangle.with_home(CellRef::at(column, row))
    }
}

/// One home coordinate after relocation: an underflowing axis snaps back
/// to the focused coordinate, an overflowing one advances by the overshoot
/// past the windows' edge, an in-bounds one stays put.
fn relocated_coordinate(home: u32, focused: u32, begin: u32, end: u32, limit: u32) -> u32 {
    if focused < begin {
        focused
    } else if focused > end {
        (home + (focused - end)).min(limit - 1)
    } else {
        home
    }
}

fn step_column(
    context: &dyn NavigationContext,
    direction: Direction,
    amount: Amount,
    from: ColumnRef,
) -> Option<ColumnRef> {
    match (direction, amount) {
        (Direction::Left, Amount::Unit) => context.left_column(from),
        (Direction::Right, Amount::Unit) => context.right_column(from),
        (Direction::Left, Amount::Pixels(pixels)) => context.left_pixels(from, pixels),
        (Direction::Right, Amount::Pixels(pixels)) => context.right_pixels(from, pixels),
        (Direction::Up | Direction::Down, _) => None,
    }
}

fn step_row(
    context: &dyn NavigationContext,
    direction: Direction,
    amount: Amount,
    from: RowRef,
) -> Option<RowRef> {
    match (direction, amount) {
        (Direction::Up, Amount::Unit) => context.up_row(from),
        (Direction::Down, Amount::Unit) => context.down_row(from),
        (Direction::Up, Amount::Pixels(pixels)) => context.up_pixels(from, pixels),
        (Direction::Down, Amount::Pixels(pixels)) => context.down_pixels(from, pixels),
        (Direction::Left | Direction::Right, _) => None,
    }
}

/// Cells spanning the fixed corner and the moved focus; equal positions
/// collapse back to the scalar cell.
fn anchored_cells(fixed: CellRef, moved: CellRef) -> AnchoredSelection {
    if fixed.column.index == moved.column.index && fixed.row.index == moved.row.index {
        return AnchoredSelection::from_parts(Selection::Cell(fixed), Anchor::None);
    }
    AnchoredSelection::from_parts(
        Selection::CellRange(CellRange::new(fixed, moved)),
        corner_anchor(fixed, moved),
    )
}

fn anchored_columns(fixed: ColumnRef, moved: ColumnRef) -> AnchoredSelection {
    if fixed.index == moved.index {
        return AnchoredSelection::from_parts(Selection::Column(fixed), Anchor::None);
    }
    let anchor = if fixed.index <= moved.index {
        Anchor::Left
    } else {
        Anchor::Right
    };
    AnchoredSelection::from_parts(
        Selection::ColumnRange(ColumnRange::new(fixed, moved)),
        anchor,
    )
}

fn anchored_rows(fixed: RowRef, moved: RowRef) -> AnchoredSelection {
    if fixed.index == moved.index {
        return AnchoredSelection::from_parts(Selection::Row(fixed), Anchor::None);
    }
    let anchor = if fixed.index <= moved.index {
        Anchor::Top
    } else {
        Anchor::Bottom
    };
    AnchoredSelection::from_parts(Selection::RowRange(RowRange::new(fixed, moved)), anchor)
}

/// The corner anchor naming where `fixed` sits relative to `other`; ties
/// resolve toward the top/left.
fn corner_anchor(fixed: CellRef, other: CellRef) -> Anchor {
    match (
        fixed.column.index <= other.column.index,
        fixed.row.index <= other.row.index,
    ) {
        (true, true) => Anchor::TopLeft,
        (true, false) => Anchor::BottomLeft,
        (false, true) => Anchor::TopRight,
        (false, false) => Anchor::BottomRight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::context::BasicNavigationContext;

    fn viewport(home: &str) -> Viewport {
        Viewport::new(format!("{home}:500:150").parse().unwrap())
    }

    fn nav(text: &str) -> Navigation {
        text.parse().unwrap()
    }

    fn selection(text: &str) -> Selection {
        text.parse().unwrap()
    }

    fn selected(viewport: &Viewport, text: &str, anchor: Anchor) -> Viewport {
        let anchored = AnchoredSelection::new(selection(text), anchor).unwrap();
        viewport.clone().with_anchored_selection(Some(anchored))
    }

    #[test]
    fn corner_anchor_resolves_ties_toward_top_left() {
        let at = |text: &str| -> CellRef { text.parse().unwrap() };
        assert_eq!(corner_anchor(at("B2"), at("D4")), Anchor::TopLeft);
        assert_eq!(corner_anchor(at("D4"), at("B2")), Anchor::BottomRight);
        assert_eq!(corner_anchor(at("B2"), at("B4")), Anchor::TopLeft);
        assert_eq!(corner_anchor(at("B4"), at("B2")), Anchor::BottomLeft);
        assert_eq!(corner_anchor(at("D2"), at("B2")), Anchor::TopRight);
    }

    #[test]
    fn anchored_cells_collapses_on_positional_equality() {
        let fixed: CellRef = "$B$2".parse().unwrap();
        let moved: CellRef = "B2".parse().unwrap();
        // Same grid position, different reference kinds.
        let anchored = anchored_cells(fixed, moved);
        assert_eq!(anchored.selection(), &Selection::Cell(fixed));
        assert_eq!(anchored.anchor(), Anchor::None);
    }

    #[test]
    fn relocated_coordinate_moves_by_the_exact_delta() {
        // In bounds: unchanged.
        assert_eq!(relocated_coordinate(2, 4, 2, 6, 100), 2);
        // Underflow: snap home back to the focused coordinate.
        assert_eq!(relocated_coordinate(5, 3, 5, 9, 100), 3);
        // Overflow: advance by the overshoot past the edge.
        assert_eq!(relocated_coordinate(0, 5, 0, 4, 100), 1);
        assert_eq!(relocated_coordinate(2, 9, 2, 6, 100), 5);
        // Clamped at the grid edge.
        assert_eq!(relocated_coordinate(98, 99, 90, 95, 100), 99);
    }

    #[test]
    fn move_without_selection_moves_home() {
        let context = BasicNavigationContext::default();
        let moved = viewport("C3").update(nav("left column"), &context);
        assert_eq!(moved.rectangle().home().to_string(), "B3");
        assert_eq!(moved.navigations().to_string(), "left column");
        assert_eq!(moved.anchored_selection(), None);

        let moved = viewport("C3").update(nav("down 40px"), &context);
        assert_eq!(moved.rectangle().home().to_string(), "C5");
    }

    #[test]
    fn move_at_the_boundary_is_a_no_op() {
        let context = BasicNavigationContext::default();
        let start = viewport("A1");
        let moved = start.update(nav("left column"), &context);
        assert_eq!(moved, start);
        assert!(moved.navigations().is_empty());
    }

    #[test]
    fn move_collapses_a_range_to_the_stepped_focus() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "A1:B1", Anchor::TopLeft);
        let moved = start.update(nav("down row"), &context);
        assert_eq!(
            moved.anchored_selection().unwrap().selection(),
            &selection("B2")
        );
        assert_eq!(moved.anchored_selection().unwrap().anchor(), Anchor::None);
    }

    #[test]
    fn vertical_move_on_a_column_selection_is_a_no_op() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B:D", Anchor::Left);
        assert_eq!(start.update(nav("down row"), &context), start);
        // The same command works horizontally, collapsing to a column.
        let moved = start.update(nav("right column"), &context);
        assert_eq!(
            moved.anchored_selection().unwrap().selection(),
            &selection("E")
        );
    }

    #[test]
    fn extend_grows_a_scalar_into_an_anchored_range() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B2", Anchor::None);

        let extended = start.update(nav("extend-right column"), &context);
        let anchored = extended.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("B2:C2"));
        assert_eq!(anchored.anchor(), Anchor::TopLeft);

        let extended = start.update(nav("extend-up row"), &context);
        let anchored = extended.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("B1:B2"));
        assert_eq!(anchored.anchor(), Anchor::BottomLeft);
    }

    #[test]
    fn extend_flips_the_anchor_when_crossing_the_fixed_corner() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B2:C2", Anchor::TopLeft);
        // Focus C2 walks left past the fixed corner B2.
        let once = start.update(nav("extend-left column"), &context);
        let anchored = once.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("B2"));
        assert_eq!(anchored.anchor(), Anchor::None);

        let twice = once.update(nav("extend-left column"), &context);
        let anchored = twice.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("A2:B2"));
        assert_eq!(anchored.anchor(), Anchor::TopRight);
    }

    #[test]
    fn extend_without_a_selection_is_a_no_op() {
        let context = BasicNavigationContext::default();
        let start = viewport("C3");
        assert_eq!(start.update(nav("extend-left column"), &context), start);
    }

    #[test]
    fn select_discards_the_previous_anchor() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B2:D4", Anchor::BottomRight);
        let replaced = start.update(nav("select cell A1"), &context);
        let anchored = replaced.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("A1"));
        assert_eq!(anchored.anchor(), Anchor::None);
    }

    #[test]
    fn extend_to_reference_spans_from_the_fixed_corner() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B2:C3", Anchor::TopLeft);
        let extended = start.update(nav("extend cell E5"), &context);
        let anchored = extended.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("B2:E5"));
        assert_eq!(anchored.anchor(), Anchor::TopLeft);

        // Target north-west of the fixed corner flips the anchor.
        let flipped = start.update(nav("extend cell A1"), &context);
        let anchored = flipped.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("A1:B2"));
        assert_eq!(anchored.anchor(), Anchor::BottomRight);
    }

    #[test]
    fn extend_to_reference_of_another_family_selects() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B2:C3", Anchor::TopLeft);
        let replaced = start.update(nav("extend column D"), &context);
        let anchored = replaced.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("D"));
        assert_eq!(anchored.anchor(), Anchor::None);
    }

    #[test]
    fn extend_to_the_fixed_corner_collapses_to_the_scalar() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "B2:D4", Anchor::TopLeft);
        let collapsed = start.update(nav("extend cell B2"), &context);
        let anchored = collapsed.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("B2"));
        assert_eq!(anchored.anchor(), Anchor::None);
    }

    #[test]
    fn updates_append_to_the_navigation_log() {
        let context = BasicNavigationContext::default();
        let stepped = viewport("C3")
            .update(nav("select cell C3"), &context)
            .update(nav("extend-right column"), &context)
            .update(nav("down row"), &context);
        assert_eq!(
            stepped.navigations().to_string(),
            "select cell C3,extend-right column,down row"
        );
    }

    #[test]
    fn home_relocates_when_the_focus_leaves_the_windows() {
        let context = BasicNavigationContext::default();
        // 500x150 at 100px/30px renders A1:E5; walking right from E1
        // pushes the focus one column past the windows.
        let start = selected(&viewport("A1"), "E1", Anchor::None);
        let moved = start.update(nav("right column"), &context);
        assert_eq!(
            moved.anchored_selection().unwrap().selection(),
            &selection("F1")
        );
        assert_eq!(moved.rectangle().home().to_string(), "B1");

        // Moving back inside leaves home where it is.
        let inside = moved.update(nav("left column"), &context);
        assert_eq!(inside.rectangle().home().to_string(), "B1");
    }

    #[test]
    fn home_snaps_back_to_an_underflowing_focus() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("C3"), "C3", Anchor::None);
        let moved = start
            .update(nav("left column"), &context)
            .update(nav("left column"), &context);
        assert_eq!(
            moved.anchored_selection().unwrap().selection(),
            &selection("A3")
        );
        assert_eq!(moved.rectangle().home().to_string(), "A3");
    }

    #[test]
    fn column_selections_pair_with_the_home_row_for_relocation() {
        let context = BasicNavigationContext::default();
        let start = selected(&viewport("A1"), "E", Anchor::None);
        let moved = start.update(nav("right column"), &context);
        assert_eq!(
            moved.anchored_selection().unwrap().selection(),
            &selection("F")
        );
        assert_eq!(moved.rectangle().home().to_string(), "B1");
    }

    #[test]
    fn hidden_columns_are_skipped_when_stepping() {
        let context =
            BasicNavigationContext::default().with_hidden_column("B".parse().unwrap());
        let start = selected(&viewport("A1"), "A1", Anchor::None);
        let moved = start.update(nav("right column"), &context);
        assert_eq!(
            moved.anchored_selection().unwrap().selection(),
            &selection("C1")
        );

        // A hidden wall before the edge makes the move impossible.
        let walled = selected(&viewport("A1"), "C1", Anchor::None);
        let context = BasicNavigationContext::default()
            .with_hidden_column("A".parse().unwrap())
            .with_hidden_column("B".parse().unwrap());
        assert_eq!(walled.update(nav("left column"), &context), walled);
    }
}

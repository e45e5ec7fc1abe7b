use core::fmt;

use tabula_refs::{CellRef, ColumnRef, RowRef};

mod list;
mod parse;
mod update;

pub use list::NavigationList;
pub use parse::NavigationParseError;

/// The grid axis a directional command moves along.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

/// How far a directional command travels: one column/row, or a pixel
/// distance resolved against the context's geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Amount {
    Unit,
    Pixels(u32),
}

/// One discrete selection/viewport mutation request.
///
/// The eight directional variants carry an [`Amount`]; the six reference
/// variants select or extend to an absolute position. `Display` renders
/// the canonical command text (`left column`, `extend-down 40px`,
/// `select cell B2`) and `FromStr` is its exact inverse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    Left(Amount),
    Right(Amount),
    Up(Amount),
    Down(Amount),
    ExtendLeft(Amount),
    ExtendRight(Amount),
    ExtendUp(Amount),
    ExtendDown(Amount),
    SelectCell(CellRef),
    SelectColumn(ColumnRef),
    SelectRow(RowRef),
    ExtendCell(CellRef),
    ExtendColumn(ColumnRef),
    ExtendRow(RowRef),
}

impl Navigation {
    /// The axis for directional commands; `None` for the reference ones.
    #[must_use]
    pub const fn axis(&self) -> Option<Axis> {
        match self {
            Navigation::Left(_)
            | Navigation::Right(_)
            | Navigation::ExtendLeft(_)
            | Navigation::ExtendRight(_) => Some(Axis::Horizontal),
            Navigation::Up(_)
            | Navigation::Down(_)
            | Navigation::ExtendUp(_)
            | Navigation::ExtendDown(_) => Some(Axis::Vertical),
            Navigation::SelectCell(_)
            | Navigation::SelectColumn(_)
            | Navigation::SelectRow(_)
            | Navigation::ExtendCell(_)
            | Navigation::ExtendColumn(_)
            | Navigation::ExtendRow(_) => None,
        }
    }

    /// True for every extending variant, directional or to-reference.
    #[must_use]
    pub const fn is_extend(&self) -> bool {
        matches!(
            self,
            Navigation::ExtendLeft(_)
                | Navigation::ExtendRight(_)
                | Navigation::ExtendUp(_)
                | Navigation::ExtendDown(_)
                | Navigation::ExtendCell(_)
                | Navigation::ExtendColumn(_)
                | Navigation::ExtendRow(_)
        )
    }

    /// True for `Select*`, the absolute selection-replacing commands.
    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(
            self,
            Navigation::SelectCell(_) | Navigation::SelectColumn(_) | Navigation::SelectRow(_)
        )
    }

    /// The reverse directional command with the same amount, or `None`
    /// for reference commands.
    ///
    /// Moves reverse to moves and extends to extends; `Left(Pixels(50))`
    /// reverses to `Right(Pixels(50))`.
    #[must_use]
    pub const fn opposite(&self) -> Option<Navigation> {
        match *self {
            Navigation::Left(amount) => Some(Navigation::Right(amount)),
            Navigation::Right(amount) => Some(Navigation::Left(amount)),
            Navigation::Up(amount) => Some(Navigation::Down(amount)),
            Navigation::Down(amount) => Some(Navigation::Up(amount)),
            Navigation::ExtendLeft(amount) => Some(Navigation::ExtendRight(amount)),
            Navigation::ExtendRight(amount) => Some(Navigation::ExtendLeft(amount)),
            Navigation::ExtendUp(amount) => Some(Navigation::ExtendDown(amount)),
            Navigation::ExtendDown(amount) => Some(Navigation::ExtendUp(amount)),
            Navigation::SelectCell(_)
            | Navigation::SelectColumn(_)
            | Navigation::SelectRow(_)
            | Navigation::ExtendCell(_)
            | Navigation::ExtendColumn(_)
            | Navigation::ExtendRow(_) => None,
        }
    }
}

fn direction_suffix(f: &mut fmt::Formatter<'_>, axis: Axis, amount: Amount) -> fmt::Result {
    match amount {
        Amount::Unit => match axis {
            Axis::Horizontal => f.write_str(" column"),
            Axis::Vertical => f.write_str(" row"),
        },
        Amount::Pixels(n) => write!(f, " {n}px"),
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Navigation::Left(amount) => {
                f.write_str("left")?;
                direction_suffix(f, Axis::Horizontal, amount)
            }
            Navigation::Right(amount) => {
                f.write_str("right")?;
                direction_suffix(f, Axis::Horizontal, amount)
            }
            Navigation::Up(amount) => {
                f.write_str("up")?;
                direction_suffix(f, Axis::Vertical, amount)
            }
            Navigation::Down(amount) => {
                f.write_str("down")?;
                direction_suffix(f, Axis::Vertical, amount)
            }
            Navigation::ExtendLeft(amount) => {
                f.write_str("extend-left")?;
                direction_suffix(f, Axis::Horizontal, amount)
            }
            Navigation::ExtendRight(amount) => {
                f.write_str("extend-right")?;
                direction_suffix(f, Axis::Horizontal, amount)
            }
            Navigation::ExtendUp(amount) => {
                f.write_str("extend-up")?;
                direction_suffix(f, Axis::Vertical, amount)
            }
            Navigation::ExtendDown(amount) => {
                f.write_str("extend-down")?;
                direction_suffix(f, Axis::Vertical, amount)
            }
            Navigation::SelectCell(cell) => write!(f, "select cell {cell}"),
            Navigation::SelectColumn(column) => write!(f, "select column {column}"),
            Navigation::SelectRow(row) => write!(f, "select row {row}"),
            Navigation::ExtendCell(cell) => write!(f, "extend cell {cell}"),
            Navigation::ExtendColumn(column) => write!(f, "extend column {column}"),
            Navigation::ExtendRow(row) => write!(f, "extend row {row}"),
        }
    }
}

impl std::str::FromStr for Navigation {
    type Err = NavigationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse_single(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<Navigation> {
        let cell: CellRef = "B2".parse().unwrap();
        let column: ColumnRef = "C".parse().unwrap();
        let row: RowRef = "4".parse().unwrap();
        let mut variants = Vec::new();
        for amount in [Amount::Unit, Amount::Pixels(40)] {
            variants.extend([
                Navigation::Left(amount),
                Navigation::Right(amount),
                Navigation::Up(amount),
                Navigation::Down(amount),
                Navigation::ExtendLeft(amount),
                Navigation::ExtendRight(amount),
                Navigation::ExtendUp(amount),
                Navigation::ExtendDown(amount),
            ]);
        }
        variants.extend([
            Navigation::SelectCell(cell),
            Navigation::SelectColumn(column),
            Navigation::SelectRow(row),
            Navigation::ExtendCell(cell),
            Navigation::ExtendColumn(column),
            Navigation::ExtendRow(row),
        ]);
        variants
    }

    #[test]
    fn canonical_text_per_variant() {
        assert_eq!(Navigation::Left(Amount::Unit).to_string(), "left column");
        assert_eq!(Navigation::Down(Amount::Unit).to_string(), "down row");
        assert_eq!(
            Navigation::ExtendRight(Amount::Unit).to_string(),
            "extend-right column"
        );
        assert_eq!(
            Navigation::ExtendDown(Amount::Pixels(40)).to_string(),
            "extend-down 40px"
        );
        assert_eq!(Navigation::Up(Amount::Pixels(123)).to_string(), "up 123px");
        assert_eq!(
            Navigation::SelectCell("B2".parse().unwrap()).to_string(),
            "select cell B2"
        );
        assert_eq!(
            Navigation::ExtendColumn("C".parse().unwrap()).to_string(),
            "extend column C"
        );
    }

    #[test]
    fn opposite_reverses_direction_and_keeps_the_amount() {
        assert_eq!(
            Navigation::Left(Amount::Pixels(50)).opposite(),
            Some(Navigation::Right(Amount::Pixels(50)))
        );
        assert_eq!(
            Navigation::ExtendUp(Amount::Unit).opposite(),
            Some(Navigation::ExtendDown(Amount::Unit))
        );
        assert_eq!(Navigation::SelectCell("A1".parse().unwrap()).opposite(), None);

        for variant in all_variants() {
            match variant.opposite() {
                Some(opposite) => {
                    assert_eq!(opposite.opposite(), Some(variant), "involution for {variant}");
                    assert_eq!(opposite.axis(), variant.axis());
                    assert_eq!(opposite.is_extend(), variant.is_extend());
                }
                None => assert_eq!(variant.axis(), None),
            }
        }
    }

    #[test]
    fn axis_classification() {
        assert_eq!(Navigation::Left(Amount::Unit).axis(), Some(Axis::Horizontal));
        assert_eq!(
            Navigation::ExtendDown(Amount::Pixels(7)).axis(),
            Some(Axis::Vertical)
        );
        assert_eq!(Navigation::SelectRow("4".parse().unwrap()).axis(), None);
        assert_eq!(Navigation::ExtendCell("B2".parse().unwrap()).axis(), None);
    }
}

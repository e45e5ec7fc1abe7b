use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tabula_refs::{
    CellRange, CellRef, ColumnRange, ColumnRef, RowRange, RowRef, Selection, SelectionKind,
};

/// Errors from anchor construction, resolution, and projection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnchorError {
    #[error("anchor {anchor} is not compatible with a {kind} selection")]
    Incompatible { anchor: Anchor, kind: SelectionKind },
    #[error("label selections cannot be anchored")]
    LabelUnsupported,
    #[error("anchor {0} has no column projection")]
    NoColumnProjection(Anchor),
    #[error("anchor {0} has no row projection")]
    NoRowProjection(Anchor),
    #[error("unknown anchor '{0}'")]
    Unknown(String),
}

/// The fixed corner or edge of a range selection.
///
/// During extension the anchored corner stays put while the opposite
/// corner moves. Scalar selections carry [`Anchor::None`]; cell ranges one
/// of the four corners; column ranges `Left`/`Right`; row ranges
/// `Top`/`Bottom`.
///
/// JSON uses the SCREAMING_SNAKE names (`"TOP_LEFT"`); `Display` and
/// `FromStr` use the kebab form (`top-left`) for URL fragments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Anchor {
    None,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum HorizontalEdge {
    Left,
    Right,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum VerticalEdge {
    Top,
    Bottom,
}

impl Anchor {
    /// Default anchor for a cell range.
    pub const CELL: Anchor = Anchor::TopLeft;
    /// Default anchor for a column range (`Right` is the other compatible one).
    pub const COLUMN_RANGE: Anchor = Anchor::Left;
    /// Default anchor for a row range (`Bottom` is the other compatible one).
    pub const ROW_RANGE: Anchor = Anchor::Top;

    const fn edges(self) -> (Option<HorizontalEdge>, Option<VerticalEdge>) {
        match self {
            Anchor::None => (None, None),
            Anchor::Left => (Some(HorizontalEdge::Left), None),
            Anchor::Right => (Some(HorizontalEdge::Right), None),
            Anchor::Top => (None, Some(VerticalEdge::Top)),
            Anchor::Bottom => (None, Some(VerticalEdge::Bottom)),
            Anchor::TopLeft => (Some(HorizontalEdge::Left), Some(VerticalEdge::Top)),
            Anchor::TopRight => (Some(HorizontalEdge::Right), Some(VerticalEdge::Top)),
            Anchor::BottomLeft => (Some(HorizontalEdge::Left), Some(VerticalEdge::Bottom)),
            Anchor::BottomRight => (Some(HorizontalEdge::Right), Some(VerticalEdge::Bottom)),
        }
    }

    const fn from_edges(
        horizontal: Option<HorizontalEdge>,
        vertical: Option<VerticalEdge>,
    ) -> Anchor {
        match (horizontal, vertical) {
            (None, None) => Anchor::None,
            (Some(HorizontalEdge::Left), None) => Anchor::Left,
            (Some(HorizontalEdge::Right), None) => Anchor::Right,
            (None, Some(VerticalEdge::Top)) => Anchor::Top,
            (None, Some(VerticalEdge::Bottom)) => Anchor::Bottom,
            (Some(HorizontalEdge::Left), Some(VerticalEdge::Top)) => Anchor::TopLeft,
            (Some(HorizontalEdge::Right), Some(VerticalEdge::Top)) => Anchor::TopRight,
            (Some(HorizontalEdge::Left), Some(VerticalEdge::Bottom)) => Anchor::BottomLeft,
            (Some(HorizontalEdge::Right), Some(VerticalEdge::Bottom)) => Anchor::BottomRight,
        }
    }

    /// True for [`Anchor::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Anchor::None)
    }

    /// True if the anchor has a left edge component.
    #[must_use]
    pub const fn is_left(&self) -> bool {
        matches!(self.edges().0, Some(HorizontalEdge::Left))
    }

    /// True if the anchor has a right edge component.
    #[must_use]
    pub const fn is_right(&self) -> bool {
        matches!(self.edges().0, Some(HorizontalEdge::Right))
    }

    /// True if the anchor has a top edge component.
    #[must_use]
    pub const fn is_top(&self) -> bool {
        matches!(self.edges().1, Some(VerticalEdge::Top))
    }

    /// True if the anchor has a bottom edge component.
    #[must_use]
    pub const fn is_bottom(&self) -> bool {
        matches!(self.edges().1, Some(VerticalEdge::Bottom))
    }

    /// The anchor with both edge components flipped.
    ///
    /// An involution: `a.opposite().opposite() == a`.
    #[must_use]
    pub const fn opposite(self) -> Anchor {
        let (horizontal, vertical) = self.edges();
        let horizontal = match horizontal {
            None => None,
            Some(HorizontalEdge::Left) => Some(HorizontalEdge::Right),
            Some(HorizontalEdge::Right) => Some(HorizontalEdge::Left),
        };
        let vertical = match vertical {
            None => None,
            Some(VerticalEdge::Top) => Some(VerticalEdge::Bottom),
            Some(VerticalEdge::Bottom) => Some(VerticalEdge::Top),
        };
        Anchor::from_edges(horizontal, vertical)
    }

    /// Set the horizontal component to left, if the anchor has one.
    ///
    /// No-op on anchors without a horizontal edge (`set_left` on `Top` is
    /// `Top`); the vertical component is never touched.
    #[must_use]
    pub const fn set_left(self) -> Anchor {
        let (horizontal, vertical) = self.edges();
        let horizontal = match horizontal {
            None => None,
            Some(_) => Some(HorizontalEdge::Left),
        };
        Anchor::from_edges(horizontal, vertical)
    }

    /// Set the horizontal component to right, if the anchor has one.
    #[must_use]
    pub const fn set_right(self) -> Anchor {
        let (horizontal, vertical) = self.edges();
        let horizontal = match horizontal {
            None => None,
            Some(_) => Some(HorizontalEdge::Right),
        };
        Anchor::from_edges(horizontal, vertical)
    }

    /// Set the vertical component to top, if the anchor has one.
    #[must_use]
    pub const fn set_top(self) -> Anchor {
        let (horizontal, vertical) = self.edges();
        let vertical = match vertical {
            None => None,
            Some(_) => Some(VerticalEdge::Top),
        };
        Anchor::from_edges(horizontal, vertical)
    }

    /// Set the vertical component to bottom, if the anchor has one.
    #[must_use]
    pub const fn set_bottom(self) -> Anchor {
        let (horizontal, vertical) = self.edges();
        let vertical = match vertical {
            None => None,
            Some(_) => Some(VerticalEdge::Bottom),
        };
        Anchor::from_edges(horizontal, vertical)
    }

    /// True iff this anchor may be paired with `selection`.
    ///
    /// Scalars take only `None`; cell ranges the four corners; column
    /// ranges `Left`/`Right`; row ranges `Top`/`Bottom`; labels nothing.
    #[must_use]
    pub fn is_compatible_with(&self, selection: &Selection) -> bool {
        match selection {
            Selection::Cell(_) | Selection::Column(_) | Selection::Row(_) => self.is_none(),
            Selection::CellRange(_) => {
                matches!(
                    self,
                    Anchor::TopLeft | Anchor::TopRight | Anchor::BottomLeft | Anchor::BottomRight
                )
            }
            Selection::ColumnRange(_) => matches!(self, Anchor::Left | Anchor::Right),
            Selection::RowRange(_) => matches!(self, Anchor::Top | Anchor::Bottom),
            Selection::Label(_) => false,
        }
    }

    /// The default anchor for a selection's kind.
    pub fn default_for(selection: &Selection) -> Result<Anchor, AnchorError> {
        match selection {
            Selection::Cell(_) | Selection::Column(_) | Selection::Row(_) => Ok(Anchor::None),
            Selection::CellRange(_) => Ok(Anchor::CELL),
            Selection::ColumnRange(_) => Ok(Anchor::COLUMN_RANGE),
            Selection::RowRange(_) => Ok(Anchor::ROW_RANGE),
            Selection::Label(_) => Err(AnchorError::LabelUnsupported),
        }
    }

    /// The fixed corner of `range` named by this anchor.
    ///
    /// `TopLeft` on `B2:D4` fixes `B2`; `BottomRight` fixes `D4`.
    pub fn cell(&self, range: &CellRange) -> Result<CellRef, AnchorError> {
        match self {
            Anchor::TopLeft => Ok(range.begin),
            Anchor::TopRight => Ok(CellRef::new(range.end.column, range.begin.row)),
            Anchor::BottomLeft => Ok(CellRef::new(range.begin.column, range.end.row)),
            Anchor::BottomRight => Ok(range.end),
            _ => Err(AnchorError::Incompatible {
                anchor: *self,
                kind: SelectionKind::CellRange,
            }),
        }
    }

    /// The fixed edge column of `range` named by this anchor.
    pub fn column(&self, range: &ColumnRange) -> Result<ColumnRef, AnchorError> {
        match self {
            Anchor::Left => Ok(range.begin),
            Anchor::Right => Ok(range.end),
            _ => Err(AnchorError::Incompatible {
                anchor: *self,
                kind: SelectionKind::ColumnRange,
            }),
        }
    }

    /// The fixed edge row of `range` named by this anchor.
    pub fn row(&self, range: &RowRange) -> Result<RowRef, AnchorError> {
        match self {
            Anchor::Top => Ok(range.begin),
            Anchor::Bottom => Ok(range.end),
            _ => Err(AnchorError::Incompatible {
                anchor: *self,
                kind: SelectionKind::RowRange,
            }),
        }
    }

    /// Project onto the column axis, discarding the vertical component.
    ///
    /// `TopLeft` becomes `Left`; `None` stays `None`; purely vertical
    /// anchors (`Top`, `Bottom`) have no column projection and fail.
    pub fn to_column_anchor(&self) -> Result<Anchor, AnchorError> {
        match self.edges() {
            (Some(HorizontalEdge::Left), _) => Ok(Anchor::Left),
            (Some(HorizontalEdge::Right), _) => Ok(Anchor::Right),
            (None, None) => Ok(Anchor::None),
            (None, Some(_)) => Err(AnchorError::NoColumnProjection(*self)),
        }
    }

    /// Project onto the row axis, discarding the horizontal component.
    pub fn to_row_anchor(&self) -> Result<Anchor, AnchorError> {
        match self.edges() {
            (_, Some(VerticalEdge::Top)) => Ok(Anchor::Top),
            (_, Some(VerticalEdge::Bottom)) => Ok(Anchor::Bottom),
            (None, None) => Ok(Anchor::None),
            (Some(_), None) => Err(AnchorError::NoRowProjection(*self)),
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::None
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Anchor::None => "none",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Top => "top",
            Anchor::Bottom => "bottom",
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        })
    }
}

impl std::str::FromStr for Anchor {
    type Err = AnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Anchor::None),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            "top" => Ok(Anchor::Top),
            "bottom" => Ok(Anchor::Bottom),
            "top-left" => Ok(Anchor::TopLeft),
            "top-right" => Ok(Anchor::TopRight),
            "bottom-left" => Ok(Anchor::BottomLeft),
            "bottom-right" => Ok(Anchor::BottomRight),
            other => Err(AnchorError::Unknown(other.to_string())),
        }
    }
}

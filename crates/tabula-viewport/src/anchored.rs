use serde::{Deserialize, Deserializer, Serialize};

use tabula_refs::{Selection, SelectionFamily};

use crate::anchor::{Anchor, AnchorError};

/// A selection paired with a compatible anchor.
///
/// The compatibility invariant is enforced at construction and on
/// deserialization, so a value of this type always satisfies the anchor
/// rules. JSON form: `{"selection": .., "anchor": "TOP_LEFT"}` with the
/// `anchor` field omitted when it is [`Anchor::None`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AnchoredSelection {
    selection: Selection,
    #[serde(skip_serializing_if = "Anchor::is_none")]
    anchor: Anchor,
}

impl AnchoredSelection {
    /// Pair a selection with an explicit anchor.
    pub fn new(selection: Selection, anchor: Anchor) -> Result<Self, AnchorError> {
        if let Selection::Label(_) = selection {
            return Err(AnchorError::LabelUnsupported);
        }
        if !anchor.is_compatible_with(&selection) {
            return Err(AnchorError::Incompatible {
                anchor,
                kind: selection.kind(),
            });
        }
        Ok(Self { selection, anchor })
    }

    /// Pair a selection with its kind's default anchor.
    ///
    /// Fails for labels, which cannot be anchored.
    pub fn from_selection(selection: Selection) -> Result<Self, AnchorError> {
        let anchor = Anchor::default_for(&selection)?;
        Ok(Self { selection, anchor })
    }

    /// Pair without re-checking; the caller guarantees compatibility.
    pub(crate) fn from_parts(selection: Selection, anchor: Anchor) -> Self {
        debug_assert!(anchor.is_compatible_with(&selection));
        Self { selection, anchor }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    #[must_use]
    pub fn family(&self) -> Option<SelectionFamily> {
        self.selection.family()
    }

    /// Replace the selection, keeping the anchor where it stays meaningful.
    ///
    /// An equal selection returns an equal value. A selection of the same
    /// kind keeps the current anchor (compatibility is per kind, so it
    /// still holds). A different kind recomputes that kind's default
    /// anchor; only labels fail.
    pub fn with_selection(&self, selection: Selection) -> Result<Self, AnchorError> {
        if selection.kind() == self.selection.kind() {
            return Ok(Self {
                selection,
                anchor: self.anchor,
            });
        }
        Self::from_selection(selection)
    }

    /// Replace the anchor, re-checking compatibility with the selection.
    pub fn with_anchor(&self, anchor: Anchor) -> Result<Self, AnchorError> {
        Self::new(self.selection.clone(), anchor)
    }

    /// The scalar selection the keyboard focus sits on: the corner or edge
    /// *opposite* the anchor for ranges, the selection itself for scalars.
    ///
    /// `A1:B1` anchored `TopLeft` focuses `B1`; extending moves this
    /// reference while the anchored corner stays put.
    #[must_use]
    pub fn focused(&self) -> Option<Selection> {
        match &self.selection {
            Selection::Cell(cell) => Some(Selection::Cell(*cell)),
            Selection::Column(column) => Some(Selection::Column(*column)),
            Selection::Row(row) => Some(Selection::Row(*row)),
            Selection::CellRange(range) => self
                .anchor
                .opposite()
                .cell(range)
                .ok()
                .map(Selection::Cell),
            Selection::ColumnRange(range) => self
                .anchor
                .opposite()
                .column(range)
                .ok()
                .map(Selection::Column),
            Selection::RowRange(range) => {
                self.anchor.opposite().row(range).ok().map(Selection::Row)
            }
            Selection::Label(_) => None,
        }
    }

    /// The scalar selection the anchor holds fixed: the corner or edge the
    /// anchor names for ranges, the selection itself for scalars.
    #[must_use]
    pub fn fixed(&self) -> Option<Selection> {
        match &self.selection {
            Selection::Cell(cell) => Some(Selection::Cell(*cell)),
            Selection::Column(column) => Some(Selection::Column(*column)),
            Selection::Row(row) => Some(Selection::Row(*row)),
            Selection::CellRange(range) => self.anchor.cell(range).ok().map(Selection::Cell),
            Selection::ColumnRange(range) => {
                self.anchor.column(range).ok().map(Selection::Column)
            }
            Selection::RowRange(range) => self.anchor.row(range).ok().map(Selection::Row),
            Selection::Label(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for AnchoredSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            selection: Selection,
            #[serde(default)]
            anchor: Anchor,
        }

        let wire = Wire::deserialize(deserializer)?;
        AnchoredSelection::new(wire.selection, wire.anchor).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_refs::SelectionKind;

    fn selection(text: &str) -> Selection {
        text.parse().unwrap()
    }

    #[test]
    fn construction_enforces_compatibility() {
        assert!(AnchoredSelection::new(selection("B2"), Anchor::None).is_ok());
        assert_eq!(
            AnchoredSelection::new(selection("B2"), Anchor::TopLeft),
            Err(AnchorError::Incompatible {
                anchor: Anchor::TopLeft,
                kind: SelectionKind::Cell
            })
        );
        assert_eq!(
            AnchoredSelection::new(selection("totals"), Anchor::None),
            Err(AnchorError::LabelUnsupported)
        );
    }

    #[test]
    fn from_selection_picks_the_default_anchor() {
        assert_eq!(
            AnchoredSelection::from_selection(selection("B2")).unwrap().anchor(),
            Anchor::None
        );
        assert_eq!(
            AnchoredSelection::from_selection(selection("B2:D4"))
                .unwrap()
                .anchor(),
            Anchor::TopLeft
        );
        assert_eq!(
            AnchoredSelection::from_selection(selection("B:D"))
                .unwrap()
                .anchor(),
            Anchor::Left
        );
        assert_eq!(
            AnchoredSelection::from_selection(selection("2:4"))
                .unwrap()
                .anchor(),
            Anchor::Top
        );
        assert_eq!(
            AnchoredSelection::from_selection(selection("totals")),
            Err(AnchorError::LabelUnsupported)
        );
    }

    #[test]
    fn with_selection_keeps_the_anchor_within_a_kind() {
        let anchored =
            AnchoredSelection::new(selection("B2:D4"), Anchor::BottomRight).unwrap();
        let moved = anchored.with_selection(selection("C3:E5")).unwrap();
        assert_eq!(moved.anchor(), Anchor::BottomRight);

        // Kind change falls back to the new kind's default.
        let columns = anchored.with_selection(selection("B:D")).unwrap();
        assert_eq!(columns.anchor(), Anchor::Left);

        assert_eq!(
            anchored.with_selection(selection("totals")),
            Err(AnchorError::LabelUnsupported)
        );
    }

    #[test]
    fn focused_is_the_anchor_opposite_corner() {
        let anchored = AnchoredSelection::new(selection("A1:B1"), Anchor::TopLeft).unwrap();
        assert_eq!(anchored.focused(), Some(selection("B1")));
        assert_eq!(anchored.fixed(), Some(selection("A1")));

        let anchored = AnchoredSelection::new(selection("B2:D4"), Anchor::BottomRight).unwrap();
        assert_eq!(anchored.focused(), Some(selection("B2")));
        assert_eq!(anchored.fixed(), Some(selection("D4")));

        let anchored = AnchoredSelection::new(selection("B:D"), Anchor::Right).unwrap();
        assert_eq!(anchored.focused(), Some(selection("B")));
        assert_eq!(anchored.fixed(), Some(selection("D")));

        let scalar = AnchoredSelection::new(selection("C3"), Anchor::None).unwrap();
        assert_eq!(scalar.focused(), Some(selection("C3")));
        assert_eq!(scalar.fixed(), Some(selection("C3")));
    }

    #[test]
    fn serde_omits_the_none_anchor_and_validates_on_read() {
        let scalar = AnchoredSelection::from_selection(selection("B2")).unwrap();
        let json = serde_json::to_value(&scalar).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "selection": { "type": "cell", "value": "B2" } })
        );
        let back: AnchoredSelection = serde_json::from_value(json).unwrap();
        assert_eq!(back, scalar);

        let err = serde_json::from_value::<AnchoredSelection>(serde_json::json!({
            "selection": { "type": "cell", "value": "B2" },
            "anchor": "TOP_LEFT"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("not compatible"), "{err}");
    }
}

use serde::{Deserialize, Serialize};

use crate::anchored::AnchoredSelection;
use crate::navigation::NavigationList;
use crate::rectangle::ViewportRectangle;

/// The persistable state of one sheet view: where it looks, whether the
/// frozen panes count as part of it, what is selected, and the navigation
/// commands applied so far.
///
/// JSON keys are camelCase; every field other than the rectangle is
/// omitted at its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    rectangle: ViewportRectangle,
    #[serde(default, skip_serializing_if = "is_false")]
    include_frozen_columns_rows: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    anchored_selection: Option<AnchoredSelection>,
    #[serde(default, skip_serializing_if = "NavigationList::is_empty")]
    navigations: NavigationList,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Viewport {
    pub const DEFAULT_INCLUDE_FROZEN_COLUMNS_ROWS: bool = false;

    /// A viewport over the given rectangle, with no selection and an
    /// empty navigation log.
    #[must_use]
    pub fn new(rectangle: ViewportRectangle) -> Self {
        Self {
            rectangle,
            include_frozen_columns_rows: Self::DEFAULT_INCLUDE_FROZEN_COLUMNS_ROWS,
            anchored_selection: None,
            navigations: NavigationList::default(),
        }
    }

    #[must_use]
    pub const fn rectangle(&self) -> ViewportRectangle {
        self.rectangle
    }

    #[must_use]
    pub const fn include_frozen_columns_rows(&self) -> bool {
        self.include_frozen_columns_rows
    }

    #[must_use]
    pub fn anchored_selection(&self) -> Option<&AnchoredSelection> {
        self.anchored_selection.as_ref()
    }

    #[must_use]
    pub fn navigations(&self) -> &NavigationList {
        &self.navigations
    }

    #[must_use]
    pub fn with_rectangle(mut self, rectangle: ViewportRectangle) -> Self {
        self.rectangle = rectangle;
        self
    }

    #[must_use]
    pub fn with_include_frozen_columns_rows(mut self, include: bool) -> Self {
        self.include_frozen_columns_rows = include;
        self
    }

    #[must_use]
    pub fn with_anchored_selection(mut self, anchored: Option<AnchoredSelection>) -> Self {
        self.anchored_selection = anchored;
        self
    }

    #[must_use]
    pub fn with_navigations(mut self, navigations: NavigationList) -> Self {
        self.navigations = navigations;
        self
    }
}

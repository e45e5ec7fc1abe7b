#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

//! Selection and viewport state for a spreadsheet grid.
//!
//! A [`Viewport`] is an immutable value: a [`ViewportRectangle`] (home cell
//! plus pixel dimensions), an optional [`AnchoredSelection`], and the
//! [`NavigationList`] of commands applied so far. [`Viewport::update`]
//! applies one [`Navigation`] command against a [`NavigationContext`] (the
//! host-provided sheet geometry) and returns the next viewport, stepping
//! over hidden columns and rows and relocating the home cell when the focus
//! leaves the rendered [`ViewportWindows`].
//!
//! Anchors name the *fixed* corner of a range selection; extending moves
//! the opposite corner. [`NavigationList::compact`] cancels opposite
//! command pairs into the canonical minimal history.
//!
//! Everything round-trips through text: the navigation command grammar
//! (`"left column,down 40px"`), JSON shapes for persistence, and the URL
//! fragment form via [`Viewport::url_fragment`] /
//! [`Viewport::parse_url_fragment`].

mod anchor;
mod anchored;
mod context;
mod fragment;
mod navigation;
mod rectangle;
mod viewport;
mod windows;

pub use anchor::{Anchor, AnchorError};
pub use anchored::AnchoredSelection;
pub use context::{BasicNavigationContext, NavigationContext};
pub use fragment::FragmentError;
pub use navigation::{Amount, Axis, Navigation, NavigationList, NavigationParseError};
pub use rectangle::{RectangleError, ViewportRectangle};
pub use viewport::Viewport;
pub use windows::{ViewportWindows, WindowsError};

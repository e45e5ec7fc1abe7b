//! `tabula-refs` defines the grid reference and selection types shared
//! across Tabula.
//!
//! This crate focuses on:
//! - Column, row, and cell references in A1 notation, with relative and
//!   absolute (`$`-prefixed) coordinate kinds.
//! - Inclusive ranges over each shape, normalized on construction.
//! - Validated label names for non-grid selection targets.
//! - The [`Selection`] sum type tying all of the above together, with
//!   tagged JSON and untyped text forms.
//!
//! The crate is intentionally self-contained so it can be reused by the
//! viewport engine, persistence layers, and IPC boundaries via `serde`.

#![forbid(unsafe_code)]
#![deny(unreachable_patterns)]

mod cell;
mod coord;
mod label;
mod range;
mod selection;

pub use cell::CellRef;
pub use coord::{ColumnRef, RefKind, RefParseError, RowRef, MAX_COLUMNS, MAX_ROWS};
pub use label::{LabelError, LabelName, MAX_LABEL_LEN};
pub use range::{CellRange, ColumnRange, RangeParseError, RowRange};
pub use selection::{Selection, SelectionFamily, SelectionKind, SelectionParseError};

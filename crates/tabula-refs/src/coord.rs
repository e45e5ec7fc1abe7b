use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Maximum rows per grid (Excel-compatible: 1,048,576).
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum columns per grid (Excel-compatible: 16,384, i.e. `A`..`XFD`).
pub const MAX_COLUMNS: u32 = 16_384;

/// Whether a coordinate is written with a `$` prefix.
///
/// The kind only affects parsing/printing and equality; grid geometry is
/// always computed from the 0-indexed position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefKind {
    Relative,
    Absolute,
}

impl RefKind {
    /// The textual prefix for this kind (`""` or `"$"`).
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            RefKind::Relative => "",
            RefKind::Absolute => "$",
        }
    }
}

impl Default for RefKind {
    fn default() -> Self {
        RefKind::Relative
    }
}

/// Errors that can occur when parsing a column, row or cell reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RefParseError {
    #[error("empty reference")]
    Empty,
    #[error("missing column in reference")]
    MissingColumn,
    #[error("missing row in reference")]
    MissingRow,
    #[error("invalid column in reference")]
    InvalidColumn,
    #[error("invalid row in reference")]
    InvalidRow,
    #[error("trailing characters in reference")]
    TrailingCharacters,
}

/// A reference to a single column.
///
/// Columns are **0-indexed**: `index = 0` is column `A`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// 0-indexed column.
    pub index: u32,
    pub kind: RefKind,
}

impl ColumnRef {
    /// Construct a relative column reference.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        debug_assert!(index < MAX_COLUMNS);
        Self {
            index,
            kind: RefKind::Relative,
        }
    }

    /// Construct a column reference with an explicit [`RefKind`].
    #[must_use]
    pub const fn with_kind(index: u32, kind: RefKind) -> Self {
        debug_assert!(index < MAX_COLUMNS);
        Self { index, kind }
    }

    /// The same column as a relative reference.
    #[must_use]
    pub const fn to_relative(self) -> Self {
        Self {
            index: self.index,
            kind: RefKind::Relative,
        }
    }

    /// The same column as an absolute (`$`-prefixed) reference.
    #[must_use]
    pub const fn to_absolute(self) -> Self {
        Self {
            index: self.index,
            kind: RefKind::Absolute,
        }
    }

    /// True for column `A`.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.index == 0
    }

    /// True for the last grid column.
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.index == MAX_COLUMNS - 1
    }

    /// The column immediately to the left, or `None` at the grid edge.
    ///
    /// The reference kind is preserved.
    #[must_use]
    pub fn left(self) -> Option<Self> {
        self.index.checked_sub(1).map(|index| Self {
            index,
            kind: self.kind,
        })
    }

    /// The column immediately to the right, or `None` at the grid edge.
    #[must_use]
    pub fn right(self) -> Option<Self> {
        let index = self.index + 1;
        (index < MAX_COLUMNS).then_some(Self {
            index,
            kind: self.kind,
        })
    }

    pub(crate) fn parse_body(s: &str) -> Result<Self, RefParseError> {
        if s.is_empty() {
            return Err(RefParseError::Empty);
        }
        let (kind, letters) = match s.strip_prefix('$') {
            Some(rest) => (RefKind::Absolute, rest),
            None => (RefKind::Relative, s),
        };
        if letters.is_empty() {
            return Err(RefParseError::MissingColumn);
        }
        let index = column_letters_to_index(letters).ok_or(RefParseError::InvalidColumn)?;
        if index >= MAX_COLUMNS {
            return Err(RefParseError::InvalidColumn);
        }
        Ok(Self { index, kind })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.kind.prefix(),
            index_to_column_letters(self.index)
        )
    }
}

impl std::str::FromStr for ColumnRef {
    type Err = RefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_body(s.trim())
    }
}

impl Serialize for ColumnRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColumnRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

/// A reference to a single row.
///
/// Rows are **0-indexed**: `index = 0` is row `1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowRef {
    /// 0-indexed row.
    pub index: u32,
    pub kind: RefKind,
}

impl RowRef {
    /// Construct a relative row reference.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        debug_assert!(index < MAX_ROWS);
        Self {
            index,
            kind: RefKind::Relative,
        }
    }

    /// Construct a row reference with an explicit [`RefKind`].
    #[must_use]
    pub const fn with_kind(index: u32, kind: RefKind) -> Self {
        debug_assert!(index < MAX_ROWS);
        Self { index, kind }
    }

    /// The same row as a relative reference.
    #[must_use]
    pub const fn to_relative(self) -> Self {
        Self {
            index: self.index,
            kind: RefKind::Relative,
        }
    }

    /// The same row as an absolute (`$`-prefixed) reference.
    #[must_use]
    pub const fn to_absolute(self) -> Self {
        Self {
            index: self.index,
            kind: RefKind::Absolute,
        }
    }

    /// True for row `1`.
    #[must_use]
    pub const fn is_first(self) -> bool {
        self.index == 0
    }

    /// True for the last grid row.
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.index == MAX_ROWS - 1
    }

    /// The row immediately above, or `None` at the grid edge.
    ///
    /// The reference kind is preserved.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        self.index.checked_sub(1).map(|index| Self {
            index,
            kind: self.kind,
        })
    }

    /// The row immediately below, or `None` at the grid edge.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        let index = self.index + 1;
        (index < MAX_ROWS).then_some(Self {
            index,
            kind: self.kind,
        })
    }

    pub(crate) fn parse_body(s: &str) -> Result<Self, RefParseError> {
        if s.is_empty() {
            return Err(RefParseError::Empty);
        }
        let (kind, digits) = match s.strip_prefix('$') {
            Some(rest) => (RefKind::Absolute, rest),
            None => (RefKind::Relative, s),
        };
        if digits.is_empty() {
            return Err(RefParseError::MissingRow);
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RefParseError::InvalidRow);
        }
        let row_1_based: u32 = digits.parse().map_err(|_| RefParseError::InvalidRow)?;
        if row_1_based == 0 || row_1_based > MAX_ROWS {
            return Err(RefParseError::InvalidRow);
        }
        Ok(Self {
            index: row_1_based - 1,
            kind,
        })
    }
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.index + 1)
    }
}

impl std::str::FromStr for RowRef {
    type Err = RefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_body(s.trim())
    }
}

impl Serialize for RowRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RowRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

pub(crate) fn column_letters_to_index(letters: &str) -> Option<u32> {
    let mut col: u32 = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(v)?;
    }
    (col > 0).then(|| col - 1)
}

pub(crate) fn index_to_column_letters(index: u32) -> String {
    // 0 -> A, 25 -> Z, 26 -> AA.
    let mut n = index + 1;
    let mut out = Vec::<u8>::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).expect("column letters are always valid UTF-8")
}

use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::cell::CellRef;

/// Maximum length of a label name, in characters.
pub const MAX_LABEL_LEN: usize = 255;

/// Errors that can occur when validating a label name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("empty label")]
    Empty,
    #[error("label is {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },
    #[error("invalid start character '{0}', labels start with a letter or underscore")]
    InvalidStartCharacter(char),
    #[error("invalid character '{ch}' at {index}")]
    InvalidCharacter { ch: char, index: usize },
    #[error("label cannot look like a cell reference")]
    LooksLikeCellReference,
}

/// A validated label name for a non-grid selection target.
///
/// Labels start with an ASCII letter or underscore and continue with
/// letters, digits, underscores, and periods. Anything that would parse
/// as a cell reference (`A1`, `XFD1048576`) is rejected so the two
/// namespaces never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelName(String);

impl LabelName {
    /// Validate and construct a label name.
    pub fn new(name: impl Into<String>) -> Result<Self, LabelError> {
        let name = name.into();
        validate_label(&name)?;
        Ok(Self(name))
    }

    /// The label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate_label(name: &str) -> Result<(), LabelError> {
    let mut chars = name.chars().enumerate();
    let Some((_, first)) = chars.next() else {
        return Err(LabelError::Empty);
    };
    let len = name.chars().count();
    if len > MAX_LABEL_LEN {
        return Err(LabelError::TooLong {
            len,
            max: MAX_LABEL_LEN,
        });
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(LabelError::InvalidStartCharacter(first));
    }
    for (index, ch) in chars {
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '.') {
            return Err(LabelError::InvalidCharacter { ch, index });
        }
    }
    if name.parse::<CellRef>().is_ok() {
        return Err(LabelError::LooksLikeCellReference);
    }
    Ok(())
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LabelName {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LabelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for LabelName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LabelName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

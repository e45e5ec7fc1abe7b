use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use tabula_refs::{CellRef, RefParseError};

/// Errors from rectangle construction and parsing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RectangleError {
    #[error("rectangle text must be <home>:<width>:<height>, got '{0}'")]
    MalformedText(String),
    #[error("invalid home cell: {0}")]
    Home(#[from] RefParseError),
    #[error("width must be a positive number, got {0}")]
    Width(String),
    #[error("height must be a positive number, got {0}")]
    Height(String),
}

/// The visible area of a viewport: a home cell plus pixel dimensions.
///
/// `home` anchors the top-left corner and is canonicalized to a relative
/// reference; `width` and `height` are finite and strictly positive.
/// Text and JSON form: `"<home>:<width>:<height>"`, e.g. `"A1:500:150"`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewportRectangle {
    home: CellRef,
    width: f64,
    height: f64,
}

impl ViewportRectangle {
    /// Construct a rectangle, validating the dimensions.
    pub fn new(home: CellRef, width: f64, height: f64) -> Result<Self, RectangleError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(RectangleError::Width(width.to_string()));
        }
        if !(height.is_finite() && height > 0.0) {
            return Err(RectangleError::Height(height.to_string()));
        }
        Ok(Self {
            home: home.to_relative(),
            width,
            height,
        })
    }

    #[must_use]
    pub fn home(&self) -> CellRef {
        self.home
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The same rectangle anchored at a different home cell.
    #[must_use]
    pub fn with_home(&self, home: CellRef) -> Self {
        Self {
            home: home.to_relative(),
            width: self.width,
            height: self.height,
        }
    }
}

impl fmt::Display for ViewportRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.home, self.width, self.height)
    }
}

impl std::str::FromStr for ViewportRectangle {
    type Err = RectangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let [home, width, height] = parts.as_slice() else {
            return Err(RectangleError::MalformedText(s.to_string()));
        };
        let home: CellRef = home.parse()?;
        let width: f64 = width
            .parse()
            .map_err(|_| RectangleError::Width(width.to_string()))?;
        let height: f64 = height
            .parse()
            .map_err(|_| RectangleError::Height(height.to_string()))?;
        Self::new(home, width, height)
    }
}

impl Serialize for ViewportRectangle {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ViewportRectangle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

use thiserror::Error;

use crate::navigation::{Amount, Axis, Navigation};

/// Errors from navigation text parsing.
///
/// Positions are character indices into the full parsed text, so errors
/// inside a comma-separated list point at the list, not the command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigationParseError {
    #[error("invalid character '{ch}' at {at}")]
    InvalidCharacter { ch: char, at: usize },
    #[error("end of text, expected {expected}")]
    EndOfText { expected: &'static str },
    #[error("invalid reference '{text}' at {at}")]
    InvalidReference { text: String, at: usize },
    #[error("pixel amount '{text}' at {at} is out of range")]
    PixelAmountOutOfRange { text: String, at: usize },
}

const KEYWORDS: &[&str] = &[
    "left",
    "right",
    "up",
    "down",
    "extend-left",
    "extend-right",
    "extend-up",
    "extend-down",
    "select",
    "extend",
];

struct Cursor<'a> {
    rest: &'a str,
    at: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input, at: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        self.rest = &self.rest[ch.len_utf8()..];
        self.at += 1;
        Some(ch)
    }

    /// Consume the longest prefix matching `pred`; returns the slice and
    /// the character index it started at.
    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> (&'a str, usize) {
        let start_at = self.at;
        let mut end = 0;
        for ch in self.rest.chars() {
            if !pred(ch) {
                break;
            }
            end += ch.len_utf8();
            self.at += 1;
        }
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        (word, start_at)
    }

    fn expect_space(&mut self, expected: &'static str) -> Result<(), NavigationParseError> {
        match self.peek() {
            Some(' ') => {
                self.bump();
                Ok(())
            }
            Some(ch) => Err(NavigationParseError::InvalidCharacter { ch, at: self.at }),
            None => Err(NavigationParseError::EndOfText { expected }),
        }
    }

    /// Parse one full command.
    fn command(&mut self) -> Result<Navigation, NavigationParseError> {
        let (keyword, start) = self.read_while(|c| c.is_ascii_lowercase() || c == '-');
        if keyword.is_empty() {
            return match self.peek() {
                Some(ch) => Err(NavigationParseError::InvalidCharacter { ch, at: self.at }),
                None => Err(NavigationParseError::EndOfText {
                    expected: "navigation command",
                }),
            };
        }
        match keyword {
            "left" => self.direction(Axis::Horizontal, Navigation::Left),
            "right" => self.direction(Axis::Horizontal, Navigation::Right),
            "up" => self.direction(Axis::Vertical, Navigation::Up),
            "down" => self.direction(Axis::Vertical, Navigation::Down),
            "extend-left" => self.direction(Axis::Horizontal, Navigation::ExtendLeft),
            "extend-right" => self.direction(Axis::Horizontal, Navigation::ExtendRight),
            "extend-up" => self.direction(Axis::Vertical, Navigation::ExtendUp),
            "extend-down" => self.direction(Axis::Vertical, Navigation::ExtendDown),
            "select" => self.reference(true),
            "extend" => self.reference(false),
            other => Err(unknown_word(other, start, KEYWORDS, self.peek())),
        }
    }

    /// The ` column` / ` row` / ` <n>px` tail of a directional command.
    fn direction(
        &mut self,
        axis: Axis,
        build: fn(Amount) -> Navigation,
    ) -> Result<Navigation, NavigationParseError> {
        let unit_word = match axis {
            Axis::Horizontal => "column",
            Axis::Vertical => "row",
        };
        self.expect_space(unit_word)?;
        match self.peek() {
            Some(ch) if ch.is_ascii_digit() => {
                let amount = self.pixel_amount()?;
                Ok(build(amount))
            }
            Some(ch) if ch.is_ascii_lowercase() => {
                let (word, start) = self.read_while(|c| c.is_ascii_lowercase());
                if word == unit_word {
                    Ok(build(Amount::Unit))
                } else {
                    Err(unknown_word(word, start, &[unit_word], self.peek()))
                }
            }
            Some(ch) => Err(NavigationParseError::InvalidCharacter { ch, at: self.at }),
            None => Err(NavigationParseError::EndOfText { expected: unit_word }),
        }
    }

    /// `<digits>px`, e.g. `40px`.
    fn pixel_amount(&mut self) -> Result<Amount, NavigationParseError> {
        let (digits, start) = self.read_while(|c| c.is_ascii_digit());
        let pixels: u32 = digits.parse().map_err(|_| {
            NavigationParseError::PixelAmountOutOfRange {
                text: digits.to_string(),
                at: start,
            }
        })?;
        for expected in ['p', 'x'] {
            match self.peek() {
                Some(ch) if ch == expected => {
                    self.bump();
                }
                Some(ch) => {
                    return Err(NavigationParseError::InvalidCharacter { ch, at: self.at })
                }
                None => return Err(NavigationParseError::EndOfText { expected: "px" }),
            }
        }
        Ok(Amount::Pixels(pixels))
    }

    /// The ` cell <ref>` / ` column <ref>` / ` row <ref>` tail of a
    /// `select` or `extend` command.
    fn reference(&mut self, select: bool) -> Result<Navigation, NavigationParseError> {
        self.expect_space("cell, column or row")?;
        let (kind, kind_start) = self.read_while(|c| c.is_ascii_lowercase());
        if kind.is_empty() {
            return match self.peek() {
                Some(ch) => Err(NavigationParseError::InvalidCharacter { ch, at: self.at }),
                None => Err(NavigationParseError::EndOfText {
                    expected: "cell, column or row",
                }),
            };
        }
        if !matches!(kind, "cell" | "column" | "row") {
            return Err(unknown_word(
                kind,
                kind_start,
                &["cell", "column", "row"],
                self.peek(),
            ));
        }
        self.expect_space("reference")?;
        let (text, start) = self.read_while(|c| c != ',');
        if text.is_empty() {
            return Err(NavigationParseError::EndOfText {
                expected: "reference",
            });
        }
        match (kind, select) {
            ("cell", true) => Ok(Navigation::SelectCell(parse_ref(text, start, true, true)?)),
            ("cell", false) => Ok(Navigation::ExtendCell(parse_ref(text, start, true, true)?)),
            ("column", true) => {
                Ok(Navigation::SelectColumn(parse_ref(text, start, true, false)?))
            }
            ("column", false) => {
                Ok(Navigation::ExtendColumn(parse_ref(text, start, true, false)?))
            }
            ("row", true) => Ok(Navigation::SelectRow(parse_ref(text, start, false, true)?)),
            ("row", false) => Ok(Navigation::ExtendRow(parse_ref(text, start, false, true)?)),
            _ => unreachable!("kind was just validated"),
        }
    }
}

/// Parse a reference of the given shape, mapping failures back to a
/// position inside the original text.
fn parse_ref<T: std::str::FromStr>(
    text: &str,
    start: usize,
    letters: bool,
    digits: bool,
) -> Result<T, NavigationParseError> {
    if let Ok(parsed) = text.parse::<T>() {
        return Ok(parsed);
    }
    for (offset, ch) in text.chars().enumerate() {
        let legal = ch == '$'
            || (letters && ch.is_ascii_alphabetic())
            || (digits && ch.is_ascii_digit());
        if !legal {
            return Err(NavigationParseError::InvalidCharacter {
                ch,
                at: start + offset,
            });
        }
    }
    // Legal characters but an invalid value, e.g. an out-of-bounds column.
    Err(NavigationParseError::InvalidReference {
        text: text.to_string(),
        at: start,
    })
}

/// Error for a word that matched no candidate: points at the first
/// character where the word diverges from its closest candidate, or
/// reports truncation when the word is a proper prefix at end of input.
fn unknown_word(
    word: &str,
    start: usize,
    candidates: &[&'static str],
    next: Option<char>,
) -> NavigationParseError {
    let common = candidates
        .iter()
        .map(|candidate| {
            word.chars()
                .zip(candidate.chars())
                .take_while(|(a, b)| a == b)
                .count()
        })
        .max()
        .unwrap_or(0);
    if common == word.chars().count() {
        // The word is a proper prefix of a candidate.
        match next {
            Some(ch) => NavigationParseError::InvalidCharacter {
                ch,
                at: start + common,
            },
            None => NavigationParseError::EndOfText {
                expected: "navigation command",
            },
        }
    } else {
        let ch = word.chars().nth(common).unwrap_or('?');
        NavigationParseError::InvalidCharacter {
            ch,
            at: start + common,
        }
    }
}

pub(crate) fn parse_single(input: &str) -> Result<Navigation, NavigationParseError> {
    let mut cursor = Cursor::new(input);
    let navigation = cursor.command()?;
    if let Some(ch) = cursor.peek() {
        return Err(NavigationParseError::InvalidCharacter { ch, at: cursor.at });
    }
    Ok(navigation)
}

pub(crate) fn parse_list(input: &str) -> Result<Vec<Navigation>, NavigationParseError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let mut cursor = Cursor::new(input);
    let mut commands = vec![cursor.command()?];
    while cursor.peek().is_some() {
        // Anything the command itself did not consume must be a separator.
        match cursor.peek() {
            Some(',') => {
                cursor.bump();
            }
            Some(ch) => {
                return Err(NavigationParseError::InvalidCharacter { ch, at: cursor.at })
            }
            None => unreachable!(),
        }
        commands.push(cursor.command()?);
    }
    Ok(commands)
}

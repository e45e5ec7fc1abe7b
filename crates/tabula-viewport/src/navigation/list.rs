use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::navigation::parse::{parse_list, NavigationParseError};
use crate::navigation::{Axis, Navigation};

/// An ordered log of navigation commands.
///
/// Text and JSON form: comma-joined command texts with no surrounding
/// whitespace (the empty list is the empty string). [`compact`] reduces
/// the log to its canonical minimal equivalent.
///
/// [`compact`]: NavigationList::compact
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NavigationList(Vec<Navigation>);

impl NavigationList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Navigation> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Navigation] {
        &self.0
    }

    /// The list with one more command appended.
    #[must_use]
    pub fn with_appended(mut self, navigation: Navigation) -> Self {
        self.0.push(navigation);
        self
    }

    /// Reduce the log to its canonical minimal form.
    ///
    /// One forward scan with an explicit stack per axis. A directional
    /// command that is the exact opposite of its axis stack's top
    /// annihilates with it (move against move, extend against extend,
    /// equal pixel amounts only). `Select*` discards everything on both
    /// stacks and survives; `Extend*`-to-reference survives without
    /// touching the stacks. Survivors keep their original order.
    ///
    /// Idempotent: compacting a compacted list changes nothing, because
    /// the stack discipline already compared every surviving neighbor
    /// pair.
    #[must_use]
    pub fn compact(&self) -> Self {
        let mut alive = vec![true; self.0.len()];
        let mut horizontal: Vec<usize> = Vec::new();
        let mut vertical: Vec<usize> = Vec::new();

        for (index, &navigation) in self.0.iter().enumerate() {
            match navigation.axis() {
                Some(axis) => {
                    let stack = match axis {
                        Axis::Horizontal => &mut horizontal,
                        Axis::Vertical => &mut vertical,
                    };
                    if let Some(&top) = stack.last() {
                        if self.0[top].opposite() == Some(navigation) {
                            stack.pop();
                            alive[top] = false;
                            alive[index] = false;
                            continue;
                        }
                    }
                    stack.push(index);
                }
                None if navigation.is_select() => {
                    for stacked in horizontal.drain(..).chain(vertical.drain(..)) {
                        alive[stacked] = false;
                    }
                }
                // Extend-to-reference: survives, no stack interaction.
                None => {}
            }
        }

        Self(
            self.0
                .iter()
                .zip(alive)
                .filter_map(|(&navigation, keep)| keep.then_some(navigation))
                .collect(),
        )
    }
}

impl From<Vec<Navigation>> for NavigationList {
    fn from(commands: Vec<Navigation>) -> Self {
        Self(commands)
    }
}

impl FromIterator<Navigation> for NavigationList {
    fn from_iter<I: IntoIterator<Item = Navigation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for NavigationList {
    type Item = Navigation;
    type IntoIter = std::vec::IntoIter<Navigation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NavigationList {
    type Item = &'a Navigation;
    type IntoIter = std::slice::Iter<'a, Navigation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for NavigationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, navigation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{navigation}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for NavigationList {
    type Err = NavigationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_list(s).map(Self)
    }
}

impl Serialize for NavigationList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NavigationList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(text: &str) -> NavigationList {
        text.parse().unwrap()
    }

    #[test]
    fn opposite_pairs_cancel() {
        assert_eq!(list("left column,right column").compact(), list(""));
        assert_eq!(list("up row,down row").compact(), list(""));
        assert_eq!(
            list("extend-left column,extend-right column").compact(),
            list("")
        );
        assert_eq!(list("left 50px,right 50px").compact(), list(""));
    }

    #[test]
    fn moves_and_extends_never_cancel_each_other() {
        let mixed = list("left column,extend-right column,up row,extend-down row");
        assert_eq!(mixed.compact(), mixed);
    }

    #[test]
    fn unequal_pixel_amounts_do_not_cancel() {
        let unequal = list("left 50px,right 40px");
        assert_eq!(unequal.compact(), unequal);
        // A unit move does not cancel a pixel move either.
        let mixed = list("left column,right 50px");
        assert_eq!(mixed.compact(), mixed);
    }

    #[test]
    fn axes_cancel_independently_under_interleaving() {
        assert_eq!(list("left column,up row,right column,down row").compact(), list(""));
        assert_eq!(
            list("left column,up row,up row,right column,down row,down row").compact(),
            list("")
        );
    }

    #[test]
    fn cancellation_cascades_through_the_stack() {
        // The middle pair vanishes first, exposing the outer pair.
        assert_eq!(
            list("left column,right column,right column,left column").compact(),
            list("")
        );
        assert_eq!(
            list("left column,left column,right column").compact(),
            list("left column")
        );
    }

    #[test]
    fn select_clears_both_stacks_and_survives() {
        assert_eq!(
            list("up row,select cell A1,down row").compact(),
            list("select cell A1,down row")
        );
        assert_eq!(
            list("left column,up row,select column C").compact(),
            list("select column C")
        );
        // Cancellation resumes against empty stacks after the select.
        assert_eq!(
            list("left column,select row 4,left column,right column").compact(),
            list("select row 4")
        );
    }

    #[test]
    fn selection_extend_passes_through_untouched() {
        assert_eq!(
            list("up row,select cell A1,down row,extend cell B2").compact(),
            list("select cell A1,down row,extend cell B2")
        );
        // It neither blocks nor participates in cancellation around it.
        assert_eq!(
            list("left column,extend cell B2,right column").compact(),
            list("extend cell B2")
        );
    }

    #[test]
    fn survivors_keep_their_original_order() {
        assert_eq!(
            list("down row,left column,down row").compact(),
            list("down row,left column,down row")
        );
    }

    #[test]
    fn compaction_is_idempotent_on_fixed_cases() {
        for text in [
            "",
            "left column",
            "left column,right column",
            "up row,select cell A1,down row,extend cell B2",
            "left 50px,right 40px,up row,down row",
            "extend-left column,extend-right column,left column",
        ] {
            let once = list(text).compact();
            assert_eq!(once.compact(), once, "idempotence for {text:?}");
        }
    }

    #[test]
    fn text_roundtrips_through_lists() {
        let text = "left column,extend-down 40px,select cell B2,extend row 4";
        assert_eq!(list(text).to_string(), text);
        assert_eq!(list("").to_string(), "");
    }

    #[test]
    fn json_is_the_comma_joined_string() {
        let navigations = list("left column,up 7px");
        assert_eq!(
            serde_json::to_string(&navigations).unwrap(),
            "\"left column,up 7px\""
        );
        let back: NavigationList = serde_json::from_str("\"left column,up 7px\"").unwrap();
        assert_eq!(back, navigations);
    }
}

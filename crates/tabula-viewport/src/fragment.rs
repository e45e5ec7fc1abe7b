use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

use tabula_refs::{Selection, SelectionParseError};

use crate::anchor::{Anchor, AnchorError};
use crate::anchored::AnchoredSelection;
use crate::navigation::{NavigationList, NavigationParseError};
use crate::rectangle::RectangleError;
use crate::viewport::Viewport;

/// Characters escaped inside the `navigations` fragment value. The command
/// grammar uses spaces, and `/` and `%` would collide with the fragment's
/// own syntax.
const NAVIGATION_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'/').add(b'%');

/// Errors from URL fragment parsing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FragmentError {
    #[error("Missing home")]
    MissingHome,
    #[error("Missing width")]
    MissingWidth,
    #[error("Missing height")]
    MissingHeight,
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown component: {0}")]
    UnknownComponent(String),
    #[error("invalid boolean: {0}")]
    InvalidBoolean(String),
    #[error("invalid percent-encoding in {0}")]
    InvalidEncoding(String),
    #[error(transparent)]
    Rectangle(#[from] RectangleError),
    #[error(transparent)]
    Selection(#[from] SelectionParseError),
    #[error(transparent)]
    Anchor(#[from] AnchorError),
    #[error(transparent)]
    Navigations(#[from] NavigationParseError),
}

impl Viewport {
    /// Render this viewport as a URL fragment.
    ///
    /// `/home/<cell>/width/<w>/height/<h>` followed by the non-default
    /// optional components; the selection's anchor segment appears only
    /// when it differs from the selection kind's default, and navigation
    /// text is percent-encoded.
    #[must_use]
    pub fn url_fragment(&self) -> String {
        let rectangle = self.rectangle();
        let mut fragment = format!(
            "/home/{}/width/{}/height/{}",
            rectangle.home(),
            rectangle.width(),
            rectangle.height()
        );
        if self.include_frozen_columns_rows() != Self::DEFAULT_INCLUDE_FROZEN_COLUMNS_ROWS {
            fragment.push_str(&format!(
                "/includeFrozenColumnsRows/{}",
                self.include_frozen_columns_rows()
            ));
        }
        if let Some(anchored) = self.anchored_selection() {
            fragment.push_str(&format!("/selection/{}", anchored.selection()));
            let default = Anchor::default_for(anchored.selection()).unwrap_or(Anchor::None);
            if anchored.anchor() != default {
                fragment.push_str(&format!("/{}", anchored.anchor()));
            }
        }
        if !self.navigations().is_empty() {
            let text = self.navigations().to_string();
            fragment.push_str(&format!(
                "/navigations/{}",
                utf8_percent_encode(&text, NAVIGATION_SET)
            ));
        }
        fragment
    }

    /// Parse a URL fragment back into a viewport; the inverse of
    /// [`Viewport::url_fragment`].
    pub fn parse_url_fragment(fragment: &str) -> Result<Viewport, FragmentError> {
        let trimmed = fragment.strip_prefix('/').unwrap_or(fragment);
        let mut segments = trimmed.split('/').peekable();

        let home = expect_component(&mut segments, "home", FragmentError::MissingHome)?;
        let width = expect_component(&mut segments, "width", FragmentError::MissingWidth)?;
        let height = expect_component(&mut segments, "height", FragmentError::MissingHeight)?;
        let rectangle = format!("{home}:{width}:{height}").parse()?;
        let mut viewport = Viewport::new(rectangle);

        while let Some(key) = segments.next() {
            match key {
                "includeFrozenColumnsRows" => {
                    let value = next_value(&mut segments, key)?;
                    let include = match value {
                        "true" => true,
                        "false" => false,
                        other => return Err(FragmentError::InvalidBoolean(other.to_string())),
                    };
                    viewport = viewport.with_include_frozen_columns_rows(include);
                }
                "selection" => {
                    let value = next_value(&mut segments, key)?;
                    let selection: Selection = value.parse()?;
                    let explicit = segments
                        .peek()
                        .and_then(|text| text.parse::<Anchor>().ok());
                    let anchored = match explicit {
                        Some(anchor) => {
                            segments.next();
                            AnchoredSelection::new(selection, anchor)?
                        }
                        None => AnchoredSelection::from_selection(selection)?,
                    };
                    viewport = viewport.with_anchored_selection(Some(anchored));
                }
                "navigations" => {
                    let value = next_value(&mut segments, key)?;
                    let decoded = percent_decode_str(value)
                        .decode_utf8()
                        .map_err(|_| FragmentError::InvalidEncoding(value.to_string()))?;
                    let navigations: NavigationList = decoded.parse()?;
                    viewport = viewport.with_navigations(navigations);
                }
                other => return Err(FragmentError::UnknownComponent(other.to_string())),
            }
        }
        Ok(viewport)
    }
}

fn expect_component<'a>(
    segments: &mut std::iter::Peekable<std::str::Split<'a, char>>,
    key: &str,
    missing: FragmentError,
) -> Result<&'a str, FragmentError> {
    match segments.next() {
        Some(found) if found == key => {}
        _ => return Err(missing),
    }
    match segments.next() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing),
    }
}

fn next_value<'a>(
    segments: &mut std::iter::Peekable<std::str::Split<'a, char>>,
    key: &str,
) -> Result<&'a str, FragmentError> {
    match segments.next() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(FragmentError::MissingValue(key.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::rectangle::ViewportRectangle;

    fn rectangle(text: &str) -> ViewportRectangle {
        text.parse().unwrap()
    }

    fn selection(text: &str) -> Selection {
        text.parse().unwrap()
    }

    #[test]
    fn minimal_viewport_renders_the_three_required_components() {
        let viewport = Viewport::new(rectangle("A1:500:150"));
        assert_eq!(viewport.url_fragment(), "/home/A1/width/500/height/150");
    }

    #[test]
    fn optional_components_render_in_order() {
        let anchored =
            AnchoredSelection::new(selection("B2:D4"), Anchor::BottomRight).unwrap();
        let viewport = Viewport::new(rectangle("C3:640:480"))
            .with_include_frozen_columns_rows(true)
            .with_anchored_selection(Some(anchored))
            .with_navigations("left column,down 40px".parse().unwrap());
        assert_eq!(
            viewport.url_fragment(),
            "/home/C3/width/640/height/480/includeFrozenColumnsRows/true\
             /selection/B2:D4/bottom-right\
             /navigations/left%20column,down%2040px"
        );
    }

    #[test]
    fn default_anchor_is_omitted_from_the_selection_component() {
        let anchored = AnchoredSelection::from_selection(selection("B2:D4")).unwrap();
        let viewport =
            Viewport::new(rectangle("A1:500:150")).with_anchored_selection(Some(anchored));
        assert_eq!(
            viewport.url_fragment(),
            "/home/A1/width/500/height/150/selection/B2:D4"
        );

        let scalar = AnchoredSelection::from_selection(selection("B2")).unwrap();
        let viewport =
            Viewport::new(rectangle("A1:500:150")).with_anchored_selection(Some(scalar));
        assert_eq!(
            viewport.url_fragment(),
            "/home/A1/width/500/height/150/selection/B2"
        );
    }

    #[test]
    fn fractional_dimensions_survive_the_render() {
        let viewport = Viewport::new(rectangle("A1:512.5:300.25"));
        assert_eq!(viewport.url_fragment(), "/home/A1/width/512.5/height/300.25");
        let back = Viewport::parse_url_fragment(&viewport.url_fragment()).unwrap();
        assert_eq!(back, viewport);
    }

    #[test]
    fn parse_reads_back_every_component() {
        let fragment = "/home/C3/width/640/height/480/includeFrozenColumnsRows/true\
                        /selection/B2:D4/bottom-right/navigations/left%20column,down%2040px";
        let viewport = Viewport::parse_url_fragment(fragment).unwrap();
        assert_eq!(viewport.rectangle(), rectangle("C3:640:480"));
        assert!(viewport.include_frozen_columns_rows());
        let anchored = viewport.anchored_selection().unwrap();
        assert_eq!(anchored.selection(), &selection("B2:D4"));
        assert_eq!(anchored.anchor(), Anchor::BottomRight);
        assert_eq!(
            viewport.navigations().to_string(),
            "left column,down 40px"
        );
    }

    #[test]
    fn parse_defaults_the_anchor_when_the_segment_is_absent() {
        let viewport =
            Viewport::parse_url_fragment("/home/A1/width/500/height/150/selection/B2:D4")
                .unwrap();
        assert_eq!(
            viewport.anchored_selection().unwrap().anchor(),
            Anchor::TopLeft
        );
    }

    #[test]
    fn missing_required_components_fail_with_exact_messages() {
        let err = Viewport::parse_url_fragment("").unwrap_err();
        assert_eq!(err, FragmentError::MissingHome);
        assert_eq!(err.to_string(), "Missing home");

        let err = Viewport::parse_url_fragment("/home/A1").unwrap_err();
        assert_eq!(err.to_string(), "Missing width");

        let err = Viewport::parse_url_fragment("/home/A1/width/500").unwrap_err();
        assert_eq!(err.to_string(), "Missing height");

        let err = Viewport::parse_url_fragment("/width/500/height/150").unwrap_err();
        assert_eq!(err.to_string(), "Missing home");
    }

    #[test]
    fn unknown_components_and_bad_values_are_rejected() {
        let base = "/home/A1/width/500/height/150";
        assert_eq!(
            Viewport::parse_url_fragment(&format!("{base}/bogus/x")).unwrap_err(),
            FragmentError::UnknownComponent("bogus".to_string())
        );
        assert_eq!(
            Viewport::parse_url_fragment(&format!("{base}/includeFrozenColumnsRows/TRUE"))
                .unwrap_err(),
            FragmentError::InvalidBoolean("TRUE".to_string())
        );
        assert_eq!(
            Viewport::parse_url_fragment(&format!("{base}/selection")).unwrap_err(),
            FragmentError::MissingValue("selection".to_string())
        );
    }

    #[test]
    fn incompatible_selection_anchor_pairs_fail() {
        let err =
            Viewport::parse_url_fragment("/home/A1/width/500/height/150/selection/B2/left")
                .unwrap_err();
        assert!(matches!(err, FragmentError::Anchor(_)), "{err:?}");
    }

    #[test]
    fn malformed_navigation_text_keeps_its_own_error() {
        let err = Viewport::parse_url_fragment(
            "/home/A1/width/500/height/150/navigations/left%20columm",
        )
        .unwrap_err();
        assert!(matches!(err, FragmentError::Navigations(_)), "{err:?}");
    }
}

use pretty_assertions::assert_eq;
use tabula_refs::{CellRange, CellRef, ColumnRef, RowRef, Selection, SelectionParseError};

#[test]
fn selection_json_is_tagged_with_string_values() {
    let selection: Selection = "B2:D4".parse().unwrap();
    let json = serde_json::to_value(&selection).expect("serialize selection");
    assert_eq!(
        json,
        serde_json::json!({
            "type": "cell-range",
            "value": "B2:D4"
        })
    );

    let roundtrip: Selection = serde_json::from_value(json).expect("deserialize selection");
    assert_eq!(roundtrip, selection);
}

#[test]
fn every_selection_shape_has_a_stable_json_tag() {
    let cases: [(&str, &str); 7] = [
        ("B2", "cell"),
        ("B", "column"),
        ("2", "row"),
        ("B2:D4", "cell-range"),
        ("B:D", "column-range"),
        ("2:4", "row-range"),
        ("totals", "label"),
    ];
    for (text, tag) in cases {
        let selection: Selection = text.parse().unwrap();
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["type"], tag, "tag for {text}");
        assert_eq!(json["value"], text, "value for {text}");
    }
}

#[test]
fn typed_json_preserves_shapes_that_untyped_text_cannot() {
    // The type tag keeps a unit cell range a range; bare text would
    // resolve `B2` to a scalar cell.
    let unit: Selection = serde_json::from_value(serde_json::json!({
        "type": "cell-range",
        "value": "B2"
    }))
    .unwrap();
    assert_eq!(unit, Selection::CellRange("B2:B2".parse().unwrap()));
    assert_eq!("B2".parse::<Selection>().unwrap(), Selection::Cell("B2".parse().unwrap()));
}

#[test]
fn all_cells_sentinel_roundtrips_through_both_forms() {
    let all = Selection::CellRange(CellRange::ALL);
    assert_eq!(all.to_string(), "*");
    assert_eq!("*".parse::<Selection>().unwrap(), all);

    let json = serde_json::to_value(&all).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "cell-range", "value": "*" }));
}

#[test]
fn absolute_markers_survive_selection_text() {
    let selection: Selection = "$B$2".parse().unwrap();
    assert_eq!(selection, Selection::Cell(CellRef::at(1, 1).to_absolute()));
    assert_eq!(selection.to_string(), "$B$2");
}

#[test]
fn untyped_parse_reports_useful_errors() {
    assert_eq!(
        "".parse::<Selection>(),
        Err(SelectionParseError::Empty)
    );
    assert_eq!(
        "B:2".parse::<Selection>().unwrap_err().to_string(),
        "mismatched range endpoints 'B:2'"
    );
    assert_eq!(
        "9no".parse::<Selection>().unwrap_err().to_string(),
        "unrecognized selection '9no'"
    );
}

#[test]
fn from_impls_cover_each_shape() {
    assert_eq!(
        Selection::from(CellRef::at(0, 0)).to_string(),
        "A1"
    );
    assert_eq!(Selection::from(ColumnRef::new(3)).to_string(), "D");
    assert_eq!(Selection::from(RowRef::new(3)).to_string(), "4");
}

//! Tests for trendtab-model types.

use trendtab_model::{Cell, CellFormat, Direction, OrderRelation, Record, Value, split_column_key};

#[test]
fn nested_json_row_to_cells() {
    let json = serde_json::json!({
        "epoch": 3,
        "train": {"Accuracy": 0.91, "stats": [0.5, 0.1]},
        "note": null
    });
    let record = Record::from_json(json).expect("object");
    assert_eq!(record.len(), 3);
    assert_eq!(Cell::from(record.get("epoch").cloned()), Cell::Integer(3));
    assert_eq!(Cell::from(record.get("note").cloned()), Cell::Missing);
    assert_eq!(Cell::from(record.get("absent").cloned()), Cell::Missing);

    let train = record.get("train").and_then(Value::as_map).expect("train");
    assert_eq!(
        Cell::from(train.get("stats").cloned()),
        Cell::Tuple(vec![0.5, 0.1])
    );
}

#[test]
fn composite_cell_uses_column_format() {
    let (name, format) = split_column_key("score___{:.2f}±{:.2f}").expect("key");
    let format = format.expect("format");
    assert_eq!(name, "score");
    let cell = Cell::Tuple(vec![1.0, 5.0]);
    let components = cell.components().expect("numeric");
    assert_eq!(format.render(&components), "1.00±5.00");
    assert!(cell.coerce().is_err());
}

#[test]
fn direction_relations_cover_all_directions() {
    use std::cmp::Ordering;

    let relations: Vec<OrderRelation> = [
        Direction::Ascending,
        Direction::Descending,
        Direction::Neutral,
    ]
    .into_iter()
    .map(|direction| direction.judge(Ordering::Greater))
    .collect();
    assert_eq!(
        relations,
        vec![
            OrderRelation::Improved,
            OrderRelation::Worsened,
            OrderRelation::Greater
        ]
    );
}

#[test]
fn cell_format_deserializes_from_string() {
    let format: CellFormat = serde_json::from_str(r#""{:.1f}""#).expect("format");
    assert_eq!(format.render(&[0.26]), "0.3");
    let err = serde_json::from_str::<CellFormat>(r#""{:.1f""#);
    assert!(err.is_err());
}

use crate::common::fill;
use pretty_assertions::assert_eq;
use sheetfill::{Direction, SubstituteOptions, VariableStore};
use sheetfill_common::Value;
use sheetfill_grid::{CellContent, JsonSheet, SheetGrid};

#[test]
fn vertical_list_fills_consecutive_rows() {
    let mut store: VariableStore = [("xs", Value::from(vec!["a", "b", "c"]))]
        .into_iter()
        .collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "Items")
        .with_text(2, 1, "%xs%")
        .with_text(3, 1, "footer");
    let (out, summary) = fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(out.text(2, 1).as_deref(), Some("a"));
    assert_eq!(out.text(3, 1).as_deref(), Some("b"));
    assert_eq!(out.text(4, 1).as_deref(), Some("c"));
    assert_eq!(out.text(5, 1).as_deref(), Some("footer"));
    assert_eq!(summary.rows_inserted, 2);
}

#[test]
fn two_lists_on_one_row_share_inserted_rows() {
    let mut store: VariableStore = [
        ("short", Value::from(vec![1, 2, 3])),
        ("long", Value::from(vec![10, 20, 30, 40, 50])),
    ]
    .into_iter()
    .collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%short%")
        .with_text(1, 2, "%long%")
        .with_text(2, 1, "footer");
    let (out, summary) = fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(summary.rows_inserted, 4);
    assert_eq!(out.text(6, 1).as_deref(), Some("footer"));
    for (row, expected) in [(1, 10.0), (3, 30.0), (5, 50.0)] {
        assert_eq!(out.content(row, 2), Some(CellContent::Number(expected)));
    }
    assert_eq!(out.content(3, 1), Some(CellContent::Number(3.0)));
    assert_eq!(out.content(4, 1), Some(CellContent::Blank));
}

#[test]
fn horizontal_list_pushes_the_row_right() {
    let mut store: VariableStore = [("xs", Value::from(vec!["a", "b", "c"]))]
        .into_iter()
        .collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%xs%")
        .with_text(1, 2, "tail")
        .with_text(2, 1, "below");
    let options = SubstituteOptions::default().with_direction(Direction::Horizontal);
    let (out, summary) = fill(sheet, &mut store, &options);

    let row: Vec<_> = (1..=4).map(|c| out.text(1, c)).collect();
    assert_eq!(
        row,
        vec![
            Some("a".to_string()),
            Some("b".to_string()),
            Some("c".to_string()),
            Some("tail".to_string())
        ]
    );
    assert_eq!(out.text(2, 1).as_deref(), Some("below"));
    assert_eq!(summary.rows_inserted, 0);
}

#[test]
fn empty_list_blanks_the_cell() {
    let mut store: VariableStore = [("xs", Value::List(Vec::new()))].into_iter().collect();
    let sheet = JsonSheet::new("S").with_text(1, 1, "%xs%").with_text(2, 1, "next");
    let (out, _) = fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(out.content(1, 1), Some(CellContent::Blank));
    assert_eq!(out.text(2, 1).as_deref(), Some("next"));
}

#[test]
fn list_sharing_a_cell_with_text_still_expands() {
    let mut store: VariableStore = [("xs", Value::from(vec![1, 2]))].into_iter().collect();
    let sheet = JsonSheet::new("S").with_text(1, 1, "values: %xs%");
    let (out, _) = fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(out.content(1, 1), Some(CellContent::Number(1.0)));
    assert_eq!(out.content(2, 1), Some(CellContent::Number(2.0)));
}

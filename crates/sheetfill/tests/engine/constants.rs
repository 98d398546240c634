use crate::common::fill;
use pretty_assertions::assert_eq;
use sheetfill::{SubstituteOptions, VariableStore};
use sheetfill_common::Value;
use sheetfill_grid::{CellContent, JsonSheet, SheetGrid};

#[test]
fn constant_is_replaced_by_its_literal() {
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%\"Invoice\"%")
        .with_text(1, 2, "Unit: %\"pcs\"%");
    let (out, summary) = fill(sheet, &mut VariableStore::new(), &SubstituteOptions::default());

    assert_eq!(out.text(1, 1).as_deref(), Some("Invoice"));
    assert_eq!(out.text(1, 2).as_deref(), Some("Unit: pcs"));
    assert_eq!(summary.resolved, 2);
    assert!(summary.is_complete());
}

#[test]
fn constant_next_to_a_list_is_copied_into_every_new_row() {
    let mut store: VariableStore = [("qty", Value::from(vec![1, 2, 3]))].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%qty%")
        .with_text(1, 2, "%\"pcs\"%");
    let (out, _) = fill(sheet, &mut store, &SubstituteOptions::default());

    for row in 1..=3 {
        assert_eq!(out.content(row, 1), Some(CellContent::Number(row as f64)));
        assert_eq!(out.text(row, 2).as_deref(), Some("pcs"));
    }
}

#[test]
fn constant_in_an_exploded_column_is_stripped_in_every_copy() {
    let mut store: VariableStore = [("people", crate::common::people())].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%people.name%")
        .with_text(2, 1, "%\"years\"%");
    let (out, _) = fill(sheet, &mut store, &SubstituteOptions::default());

    for col in 1..=3 {
        assert_eq!(out.text(2, col).as_deref(), Some("years"));
    }
}

#[test]
fn empty_store_leaves_placeholders_alone() {
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%title%")
        .with_text(2, 1, "Dear %name/fit:auto%,")
        .with_text(3, 1, "%lines.amount%");
    let (out, summary) = fill(
        sheet.clone(),
        &mut VariableStore::new(),
        &SubstituteOptions::default(),
    );

    assert_eq!(out, sheet);
    assert_eq!(summary.unresolved, 3);
    assert!(!summary.is_complete());
}

#[test]
fn constant_left_of_a_list_reaches_new_rows() {
    let mut store: VariableStore = [("qty", Value::from(vec![1, 2, 3]))].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%\"pcs\"%")
        .with_text(1, 2, "%qty%");
    let (out, summary) = fill(sheet, &mut store, &SubstituteOptions::default());

    let units: Vec<_> = (1..=3).map(|r| out.text(r, 1)).collect();
    assert_eq!(units, vec![Some("pcs".to_string()); 3]);
    assert_eq!(out.content(3, 2), Some(CellContent::Number(3.0)));
    assert_eq!(summary.resolved, 2);
}

#[test]
fn constant_above_a_record_column_is_copied_without_duplicate_all() {
    let mut store: VariableStore = [("people", crate::common::people())].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%\"years\"%")
        .with_text(2, 1, "%people.name%")
        .with_text(3, 1, "note");
    let options = SubstituteOptions::default().with_duplicate_all(false);
    let (out, _) = fill(sheet, &mut store, &options);

    let header: Vec<_> = (1..=3).map(|c| out.text(1, c)).collect();
    assert_eq!(header, vec![Some("years".to_string()); 3]);
    assert_eq!(out.text(2, 3).as_deref(), Some("cy"));
    assert_eq!(out.content(3, 2), None);
}

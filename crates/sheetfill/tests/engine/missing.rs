use crate::common::fill;
use pretty_assertions::assert_eq;
use sheetfill::{SubstituteOptions, VariableStore};
use sheetfill_grid::{CellContent, JsonSheet, SheetGrid};

fn sheet() -> JsonSheet {
    JsonSheet::new("S")
        .with_text(1, 1, "%missing%")
        .with_text(1, 2, "a %missing% b")
        .with_text(2, 1, "%known%")
}

#[test]
fn missing_placeholders_are_removed_when_asked() {
    let mut store: VariableStore = [("known", "yes")].into_iter().collect();
    let options = SubstituteOptions::default().with_remove_non_existent(true);
    let (out, summary) = fill(sheet(), &mut store, &options);

    assert_eq!(out.content(1, 1), Some(CellContent::Blank));
    assert_eq!(out.text(1, 2).as_deref(), Some("a  b"));
    assert_eq!(out.text(2, 1).as_deref(), Some("yes"));
    assert_eq!(summary.removed, 2);
    assert!(summary.is_complete());
}

#[test]
fn missing_placeholders_stay_by_default() {
    let mut store: VariableStore = [("known", "yes")].into_iter().collect();
    let (out, summary) = fill(sheet(), &mut store, &SubstituteOptions::default());

    assert_eq!(out.text(1, 1).as_deref(), Some("%missing%"));
    assert_eq!(out.text(1, 2).as_deref(), Some("a %missing% b"));
    assert_eq!(summary.unresolved, 2);
    assert_eq!(summary.removed, 0);
}

#[test]
fn dotted_path_without_a_stored_root_is_missing() {
    let mut store = VariableStore::new();
    let options = SubstituteOptions::default().with_remove_non_existent(true);
    let sheet = JsonSheet::new("S").with_text(1, 1, "x%a.b.c%y");
    let (out, _) = fill(sheet, &mut store, &options);

    assert_eq!(out.text(1, 1).as_deref(), Some("xy"));
}

#[test]
fn record_root_without_a_field_is_left_alone() {
    let mut store: VariableStore = [("people", crate::common::people())].into_iter().collect();
    let sheet = JsonSheet::new("S").with_text(1, 1, "%people.%");
    let (out, summary) = fill(sheet.clone(), &mut store, &SubstituteOptions::default());

    assert_eq!(out, sheet);
    assert_eq!(summary.unresolved, 1);
    assert_eq!(summary.sheets["S"].structural_passes, 0);
}

use crate::common::{fill, people, record};
use pretty_assertions::assert_eq;
use sheetfill::{Direction, SubstituteOptions, VariableStore};
use sheetfill_common::Value;
use sheetfill_grid::{CellContent, JsonSheet, JsonStyle, SheetGrid};

fn horizontal() -> SubstituteOptions {
    SubstituteOptions::default().with_direction(Direction::Horizontal)
}

#[test]
fn vertical_record_array_adds_a_column_per_record() {
    let mut store: VariableStore = [("people", people())].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "Name")
        .with_text(1, 2, "%people.name%")
        .with_text(2, 1, "Age")
        .with_text(2, 2, "%people.age%");
    let (out, summary) = fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(out.last_column_of_sheet(), 4);
    let names: Vec<_> = (2..=4).map(|c| out.text(1, c)).collect();
    assert_eq!(
        names,
        vec![
            Some("ann".to_string()),
            Some("bob".to_string()),
            Some("cy".to_string())
        ]
    );
    assert_eq!(out.content(2, 4), Some(CellContent::Number(27.0)));
    assert_eq!(out.text(2, 1).as_deref(), Some("Age"));
    assert!(summary.is_complete());
    assert_eq!(summary.sheets["S"].structural_passes, 1);
}

#[test]
fn store_keeps_flattened_records() {
    let mut store: VariableStore = [("people", people())].into_iter().collect();
    let sheet = JsonSheet::new("S").with_text(1, 1, "%people.name%");
    fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(store.get("1.people.name"), Some(&Value::from("bob")));
    assert!(store.contains("people"));
}

#[test]
fn horizontal_record_array_repeats_the_row_block() {
    let mut store: VariableStore = [("people", people()), ("total", Value::Int(3))]
        .into_iter()
        .collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%people.name%")
        .with_text(2, 1, "age %people.age%")
        .with_text(3, 1, "Total: %total%");
    let (out, summary) = fill(sheet, &mut store, &horizontal());

    let column: Vec<_> = (1..=7).map(|r| out.text(r, 1)).collect();
    assert_eq!(
        column,
        vec![
            Some("ann".to_string()),
            Some("age 31".to_string()),
            Some("bob".to_string()),
            Some("age 42".to_string()),
            Some("cy".to_string()),
            Some("age 27".to_string()),
            Some("Total: 3".to_string()),
        ]
    );
    assert_eq!(summary.rows_inserted, 4);
    assert!(summary.is_complete());
}

#[test]
fn horizontal_records_reach_nested_maps() {
    let mut address = sheetfill_common::Record::new();
    address.insert("city".into(), Value::from("Ghent"));
    let shops = Value::RecordArray(vec![
        record(&[("name", "north".into()), ("address", Value::Map(address.clone()))]),
        record(&[("name", "south".into()), ("address", Value::Map(address))]),
    ]);
    let mut store: VariableStore = [("shops", shops)].into_iter().collect();
    let sheet = JsonSheet::new("S").with_text(1, 1, "%shops.name% in %shops.address.city%");
    let (out, _) = fill(sheet, &mut store, &horizontal());

    assert_eq!(out.text(1, 1).as_deref(), Some("north in Ghent"));
    assert_eq!(out.text(2, 1).as_deref(), Some("south in Ghent"));
}

#[test]
fn block_keeps_plain_rows_before_a_foreign_placeholder() {
    let mut store: VariableStore = [("people", people()), ("total", Value::Int(3))]
        .into_iter()
        .collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%people.name%")
        .with_text(2, 1, "----")
        .with_text(3, 1, "%total%");
    let (out, _) = fill(sheet, &mut store, &horizontal());

    assert_eq!(out.text(3, 1).as_deref(), Some("bob"));
    assert_eq!(out.text(4, 1).as_deref(), Some("----"));
    assert_eq!(out.content(7, 1), Some(CellContent::Number(3.0)));
}

#[test]
fn repeated_blocks_drop_fit_auto_except_the_last() {
    let mut store: VariableStore = [("people", people())].into_iter().collect();
    let sheet = JsonSheet::new("S").with_text(1, 1, "%people.name/fit:auto%");
    let (out, _) = fill(sheet, &mut store, &horizontal());

    assert_eq!(out.text(3, 1).as_deref(), Some("cy"));
    assert!(out.autosized.contains(&1));
}

#[test]
fn single_record_needs_no_copies() {
    let one = Value::RecordArray(vec![record(&[("name", "solo".into())])]);
    let mut store: VariableStore = [("people", one)].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%people.name%")
        .with_text(1, 2, "after");
    let (out, summary) = fill(sheet, &mut store, &SubstituteOptions::default());

    assert_eq!(out.text(1, 1).as_deref(), Some("solo"));
    assert_eq!(out.text(1, 2).as_deref(), Some("after"));
    assert_eq!(summary.rows_inserted, 0);
}

#[test]
fn fit_auto_listed_first_keeps_the_other_directives() {
    let mut store: VariableStore = [("people", people())].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%people.name/fit:auto;border:0101%")
        .with_style(1, 1, JsonStyle::boxed());
    let (out, summary) = fill(sheet, &mut store, &horizontal());

    let names: Vec<_> = (1..=3).map(|r| out.text(r, 1)).collect();
    assert_eq!(
        names,
        vec![
            Some("ann".to_string()),
            Some("bob".to_string()),
            Some("cy".to_string())
        ]
    );
    assert!(summary.is_complete());
    for row in 1..=3 {
        let style = out.style(row, 1).unwrap();
        assert_eq!(style.border_top.as_deref(), Some("none"));
        assert_eq!(style.border_right.as_deref(), Some("thin"));
    }
    assert!(out.autosized.contains(&1));
}

#[test]
fn horizontal_without_duplicate_all_copies_only_record_cells() {
    let mut store: VariableStore = [("people", people())].into_iter().collect();
    let sheet = JsonSheet::new("S")
        .with_text(1, 1, "%people.name%")
        .with_text(1, 2, "label")
        .with_text(1, 3, "%\"x\"%");
    let options = horizontal().with_duplicate_all(false);
    let (out, _) = fill(sheet, &mut store, &options);

    assert_eq!(out.text(1, 2).as_deref(), Some("label"));
    for (row, name) in [(2, "bob"), (3, "cy")] {
        assert_eq!(out.text(row, 1).as_deref(), Some(name));
        assert_eq!(out.content(row, 2), None);
        assert_eq!(out.text(row, 3).as_deref(), Some("x"));
    }
}

use crate::placeholder::{Directive, Fit};
use sheetfill_common::{Value, datetime_to_cell_number};
use sheetfill_grid::{CellContent, SheetGrid};

/// Cell payload for a resolved value. Lists, record arrays and maps fall back to text.
pub fn content_for(value: &Value) -> CellContent {
    match value {
        Value::Null => CellContent::Blank,
        Value::Bool(b) => CellContent::Bool(*b),
        Value::Int(i) => CellContent::Number(*i as f64),
        Value::Float(n) => CellContent::Number(*n),
        Value::DateTime(dt) => CellContent::Number(datetime_to_cell_number(dt)),
        Value::Text(s) => CellContent::Text(s.clone()),
        Value::List(_) | Value::RecordArray(_) | Value::Map(_) => {
            CellContent::Text(value.to_string())
        }
    }
}

/// Writes `value` into the cell, keeping its style, then applies `directive`.
pub fn write_value<G: SheetGrid + ?Sized>(
    grid: &mut G,
    row: u32,
    col: u32,
    value: &Value,
    directive: Option<&Directive>,
) {
    grid.set_content(row, col, content_for(value));
    apply_directive(grid, row, col, directive);
}

/// Writes text into the cell, then applies `directive`.
pub fn write_text<G: SheetGrid + ?Sized>(
    grid: &mut G,
    row: u32,
    col: u32,
    text: String,
    directive: Option<&Directive>,
) {
    grid.set_content(row, col, CellContent::Text(text));
    apply_directive(grid, row, col, directive);
}

/// Border masks only ever clear sides; `fit:auto` autosizes the whole column.
pub fn apply_directive<G: SheetGrid + ?Sized>(
    grid: &mut G,
    row: u32,
    col: u32,
    directive: Option<&Directive>,
) {
    let Some(directive) = directive.filter(|d| !d.is_noop()) else {
        return;
    };
    if directive.clear_borders.any() {
        grid.clear_borders(row, col, directive.clear_borders);
    }
    if directive.fit == Fit::Auto {
        grid.autosize_column(col);
    }
}

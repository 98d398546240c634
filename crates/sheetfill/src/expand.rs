//! List-driven growth: one value per row (vertical) or per column (horizontal).

use crate::error::TemplateError;
use crate::placeholder::Directive;
use crate::shift::ShiftTracker;
use crate::writer::write_value;
use sheetfill_common::Value;
use sheetfill_grid::SheetGrid;

/// Fills `items` downwards from `(row, col)`, inserting rows through the tracker so a
/// neighbouring list on the same row reuses them. Returns the rows inserted.
pub fn expand_vertical<G: SheetGrid + ?Sized>(
    grid: &mut G,
    tracker: &mut ShiftTracker,
    row: u32,
    col: u32,
    items: &[Value],
    directive: Option<&Directive>,
) -> Result<u32, TemplateError> {
    if items.is_empty() {
        write_value(grid, row, col, &Value::Null, directive);
        return Ok(0);
    }
    let inserted = tracker.insert_rows(grid, row, items.len() as u32 - 1)?;
    for (offset, item) in items.iter().enumerate() {
        write_value(grid, row + offset as u32, col, item, directive);
    }
    Ok(inserted)
}

/// Fills `items` to the right of `(row, col)`, pushing the rest of the row out of the way.
pub fn expand_horizontal<G: SheetGrid + ?Sized>(
    grid: &mut G,
    row: u32,
    col: u32,
    items: &[Value],
    directive: Option<&Directive>,
) {
    let Some((first, rest)) = items.split_first() else {
        write_value(grid, row, col, &Value::Null, directive);
        return;
    };
    let extra = rest.len() as u32;
    if extra > 0 {
        for c in grid.column_indices(row).into_iter().rev() {
            if c > col {
                grid.move_cell((row, c), (row, c + extra));
            }
        }
        for offset in 1..=extra {
            grid.copy_style((row, col), (row, col + offset));
        }
    }
    write_value(grid, row, col, first, directive);
    for (offset, item) in rest.iter().enumerate() {
        write_value(grid, row, col + 1 + offset as u32, item, directive);
    }
}

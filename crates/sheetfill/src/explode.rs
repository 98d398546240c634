//! Record-array flattening.
//!
//! A placeholder such as `%people.name%` whose root `people` is a record array makes the
//! template grow one copy per record: a column copy (vertical) or a row-block copy
//! (horizontal). Copy `i` has its `%people.x%` tokens rewritten to `%i.people.x%` and the
//! store receives matching `i.people.x` entries.

use crate::error::TemplateError;
use crate::placeholder::{
    has_constant, has_foreign_placeholder, prefix_root, references_root, strip_fit_auto,
};
use crate::shift::ShiftTracker;
use crate::store::VariableStore;
use sheetfill_common::Record;
use sheetfill_grid::{CellContent, SheetGrid, col_to_a1};

/// Whether a cell takes part in duplication when `duplicate_all` is off.
fn belongs_to_record(content: &CellContent, root: &str) -> bool {
    content
        .as_text()
        .is_some_and(|t| references_root(t, root) || has_constant(t))
}

fn rewrite_in_place<G: SheetGrid + ?Sized>(
    grid: &mut G,
    row: u32,
    col: u32,
    root: &str,
    index: usize,
    strip_fit: bool,
) {
    let Some(CellContent::Text(text)) = grid.content(row, col) else {
        return;
    };
    let mut rewritten = prefix_root(&text, root, index);
    if strip_fit {
        rewritten = strip_fit_auto(&rewritten).into_owned();
    }
    if rewritten != text {
        grid.set_content(row, col, CellContent::Text(rewritten));
    }
}

/// Duplicates column `col` once per extra record and flattens the records one level deep.
///
/// Only the trailing column can grow without disturbing the layout; other columns are
/// still handled but the cells to their right are pushed along.
pub fn explode_vertical<G: SheetGrid + ?Sized>(
    grid: &mut G,
    store: &mut VariableStore,
    root: &str,
    records: &[Record],
    col: u32,
    duplicate_all: bool,
) {
    let last = grid.last_column_of_sheet();
    if col != last {
        tracing::warn!(
            sheet = grid.name(),
            root,
            column = %col_to_a1(col),
            last = %col_to_a1(last),
            "record array is not in the last column, cells to its right will move"
        );
    }
    let n = records.len();
    if n > 1 {
        let extra = (n - 1) as u32;
        for row in grid.row_indices() {
            let cell = grid.content(row, col);
            if !duplicate_all && cell.as_ref().is_some_and(|c| !belongs_to_record(c, root)) {
                continue;
            }
            for c in grid.column_indices(row).into_iter().rev() {
                if c > col {
                    grid.move_cell((row, c), (row, c + extra));
                }
            }
            if cell.is_none() {
                continue;
            }
            for i in 1..n {
                let target = col + i as u32;
                grid.copy_cell((row, col), (row, target));
                rewrite_in_place(grid, row, target, root, i, false);
            }
        }
    }
    store.explode_one_level(root, records);
    for row in grid.row_indices() {
        rewrite_in_place(grid, row, col, root, 0, false);
    }
}

/// Number of rows, starting at `row`, that form one record's block.
///
/// A row belongs to the block when it references `root` or holds no other placeholder.
/// Scanning stops at the first row with an unrelated placeholder. Blank rows left over
/// when the sheet runs out are not part of the block.
pub fn block_size<G: SheetGrid + ?Sized>(grid: &G, row: u32, root: &str) -> u32 {
    let mut size = 0;
    let mut trailing_blank = 0;
    for r in row..=grid.last_row() {
        let mut rooted = false;
        let mut foreign = false;
        for c in grid.column_indices(r) {
            let Some(CellContent::Text(text)) = grid.content(r, c) else {
                continue;
            };
            if references_root(&text, root) {
                rooted = true;
                break;
            }
            if has_foreign_placeholder(&text, root) {
                foreign = true;
            }
        }
        if rooted {
            trailing_blank = 0;
            size += 1;
        } else if !foreign {
            trailing_blank += 1;
            size += 1;
        } else {
            return size;
        }
    }
    size - trailing_blank
}

/// Options for [`explode_horizontal`].
#[derive(Debug, Clone, Copy)]
pub struct BlockRules {
    pub duplicate_all: bool,
    pub strip_repeated_fit: bool,
}

/// Replicates the block starting at `row` once per extra record and flattens every record
/// (nested maps included) under `<i>.<root>`. Returns the rows inserted.
pub fn explode_horizontal<G: SheetGrid + ?Sized>(
    grid: &mut G,
    tracker: &mut ShiftTracker,
    store: &mut VariableStore,
    root: &str,
    records: &[Record],
    row: u32,
    rules: BlockRules,
) -> Result<u32, TemplateError> {
    let size = block_size(grid, row, root).max(1);
    let n = records.len();
    let mut inserted = 0;
    if n > 1 {
        let extra = (n - 1) as u32;
        inserted = size * extra;
        let below = row + size;
        tracing::debug!(root, row, size, records = n, "replicating row block");
        grid.insert_rows(below, inserted);
        tracker.note_inserted(below, inserted)?;

        for i in 1..n {
            let strip_fit = rules.strip_repeated_fit && i < n - 1;
            for j in 0..size {
                let src = row + j;
                let dst = row + i as u32 * size + j;
                for c in grid.column_indices(src) {
                    let Some(cell) = grid.content(src, c) else {
                        continue;
                    };
                    if !rules.duplicate_all && !belongs_to_record(&cell, root) {
                        continue;
                    }
                    grid.copy_cell((src, c), (dst, c));
                    rewrite_in_place(grid, dst, c, root, i, strip_fit);
                }
            }
        }
    }
    for j in 0..size {
        for c in grid.column_indices(row + j) {
            rewrite_in_place(grid, row + j, c, root, 0, false);
        }
    }
    for (i, record) in records.iter().enumerate() {
        store.explode_deep(&format!("{i}.{root}"), record);
    }
    Ok(inserted)
}

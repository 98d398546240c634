use crate::error::TemplateError;
use crate::placeholder::{has_constant, strip_constants};
use sheetfill_grid::{CellContent, SheetGrid};
use std::collections::BTreeMap;

/// Rows already inserted beneath each template row of one sheet.
///
/// Two lists side by side on the same row share the inserted rows: a list of 3 followed by
/// a list of 5 on row 4 inserts 2 rows and then 2 more, not 2 and 4.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftTracker {
    shifts: BTreeMap<u32, u32>,
}

impl ShiftTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift_at(&self, row: u32) -> u32 {
        self.shifts.get(&row).copied().unwrap_or(0)
    }

    /// Ensures `desired` rows exist beneath `row`, inserting only what earlier calls for
    /// the same row did not. Returns the number of rows actually inserted.
    ///
    /// New rows clone the per-cell style of `row`; cells holding a `%"constant"%` are
    /// copied as bare text, the rest start blank.
    pub fn insert_rows<G: SheetGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        row: u32,
        desired: u32,
    ) -> Result<u32, TemplateError> {
        let already = self.shift_at(row);
        if desired <= already {
            return Ok(0);
        }
        let remainder = desired - already;
        let first_new = row + 1 + already;
        tracing::debug!(row, remainder, first_new, "inserting rows");

        grid.insert_rows(first_new, remainder);
        let template: Vec<(u32, Option<String>)> = grid
            .column_indices(row)
            .into_iter()
            .map(|col| {
                let constant = grid
                    .content(row, col)
                    .and_then(|c| c.as_text().map(str::to_string))
                    .filter(|t| has_constant(t))
                    .map(|t| strip_constants(&t).into_owned());
                (col, constant)
            })
            .collect();
        for new_row in first_new..first_new + remainder {
            for (col, constant) in &template {
                grid.copy_style((row, *col), (new_row, *col));
                let content = match constant {
                    Some(text) => CellContent::Text(text.clone()),
                    None => CellContent::Blank,
                };
                grid.set_content(new_row, *col, content);
            }
        }

        self.shifts.insert(row, desired);
        self.rekey_after(row, remainder)?;
        Ok(remainder)
    }

    /// Records `count` rows inserted by someone else before row `before`.
    pub fn note_inserted(&mut self, before: u32, count: u32) -> Result<(), TemplateError> {
        if count == 0 || before == 0 {
            return Ok(());
        }
        self.rekey_after(before - 1, count)
    }

    fn rekey_after(&mut self, row: u32, amount: u32) -> Result<(), TemplateError> {
        let mut rekeyed = BTreeMap::new();
        // high to low, so a moved key never lands on one still waiting to move
        for (&key, &shift) in self.shifts.iter().rev() {
            let target = if key > row { key + amount } else { key };
            if rekeyed.insert(target, shift).is_some() {
                return Err(TemplateError::ShiftCollision { row, key: target });
            }
        }
        self.shifts = rekeyed;
        Ok(())
    }
}

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    /// Placeholders replaced by a value or a constant.
    pub resolved: usize,
    /// Placeholders still present when the sheet reached its fixed point.
    pub unresolved: usize,
    /// Missing placeholders blanked or stripped.
    pub removed: usize,
    pub rows_inserted: u32,
    /// Scan passes restarted after a structural change.
    pub structural_passes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionSummary {
    pub resolved: usize,
    pub unresolved: usize,
    pub removed: usize,
    pub rows_inserted: u32,
    /// Keyed by the final (substituted) sheet name.
    pub sheets: BTreeMap<String, SheetSummary>,
}

impl SubstitutionSummary {
    pub fn record_sheet(&mut self, name: impl Into<String>, sheet: SheetSummary) {
        self.resolved += sheet.resolved;
        self.unresolved += sheet.unresolved;
        self.removed += sheet.removed;
        self.rows_inserted += sheet.rows_inserted;
        self.sheets.insert(name.into(), sheet);
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved == 0
    }
}

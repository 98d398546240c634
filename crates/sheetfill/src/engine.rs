use crate::error::TemplateError;
use crate::explode::{BlockRules, explode_horizontal, explode_vertical};
use crate::expand::{expand_horizontal, expand_vertical};
use crate::options::{Direction, SubstituteOptions};
use crate::placeholder::{
    Directive, Placeholder, constant_count, has_token, strip_constants, tokens,
};
use crate::shift::ShiftTracker;
use crate::store::VariableStore;
use crate::summary::{SheetSummary, SubstitutionSummary};
use crate::writer::{write_text, write_value};
use rustc_hash::FxHashSet;
use sheetfill_common::Value;
use sheetfill_grid::{CellContent, GridDocument, SheetGrid};

/// State owned by the pass over one sheet.
#[derive(Default)]
struct SheetState {
    tracker: ShiftTracker,
    summary: SheetSummary,
    warned: FxHashSet<String>,
}

impl SheetState {
    fn warn_once(&mut self, sheet: &str, path: &str, reason: &'static str) {
        if self.warned.insert(path.to_string()) {
            tracing::warn!(sheet, path, "{reason}");
        }
    }
}

/// The placeholder currently being resolved.
struct Site<'t> {
    row: u32,
    col: u32,
    token: &'t str,
    /// Current cell text containing `token`.
    text: &'t str,
}

impl Site<'_> {
    fn is_whole_cell(&self) -> bool {
        self.text == self.token
    }
}

/// Drives every sheet of a document to its fixed point.
///
/// A pass scans the sheet row by row and resolves placeholders in place. Any structural
/// change (rows inserted, cells pushed right, columns or blocks copied) ends the pass and
/// the next one starts again from the top. The sheet is done when a pass finds nothing
/// left to restructure.
pub struct SubstitutionEngine<'a> {
    store: &'a mut VariableStore,
    options: &'a SubstituteOptions,
}

impl<'a> SubstitutionEngine<'a> {
    pub fn new(store: &'a mut VariableStore, options: &'a SubstituteOptions) -> Self {
        Self { store, options }
    }

    pub fn run<D: GridDocument>(&mut self, doc: &mut D) -> Result<SubstitutionSummary, TemplateError> {
        let mut summary = SubstitutionSummary::default();
        for index in 0..doc.sheet_count() {
            let sheet = doc
                .sheet_mut(index)
                .ok_or(TemplateError::SheetMissing(index))?;
            let sheet_summary = self.substitute_sheet(sheet)?;
            summary.record_sheet(sheet.name(), sheet_summary);
        }
        Ok(summary)
    }

    pub fn substitute_sheet<G: SheetGrid + ?Sized>(
        &mut self,
        grid: &mut G,
    ) -> Result<SheetSummary, TemplateError> {
        self.substitute_sheet_name(grid);
        let name = grid.name().to_string();
        let _span = tracing::info_span!("substitute_sheet", sheet = name.as_str()).entered();

        let mut state = SheetState::default();
        while self.scan_pass(grid, &mut state)? {
            state.summary.structural_passes += 1;
        }
        state.summary.resolved += settle_constants(grid);
        tracing::debug!(
            resolved = state.summary.resolved,
            unresolved = state.summary.unresolved,
            rows_inserted = state.summary.rows_inserted,
            passes = state.summary.structural_passes,
            "sheet done"
        );
        Ok(state.summary)
    }

    /// Sheet names only take exact lookups and constants; anything else stays.
    fn substitute_sheet_name<G: SheetGrid + ?Sized>(&self, grid: &mut G) {
        let name = grid.name().to_string();
        let mut renamed = name.clone();
        for token in tokens(&name) {
            match Placeholder::parse(token) {
                Placeholder::Constant(literal) => renamed = renamed.replace(token, &literal),
                Placeholder::Variable { path, .. } => match self.store.get(&path) {
                    Some(value) => renamed = renamed.replace(token, &value.to_string()),
                    None => tracing::debug!(sheet = name.as_str(), %path, "sheet name placeholder left"),
                },
            }
        }
        if renamed != name {
            tracing::debug!(from = name.as_str(), to = renamed.as_str(), "renaming sheet");
            grid.rename(&renamed);
        }
    }

    /// One row-major scan. Returns `true` when the sheet changed shape and must be rescanned.
    fn scan_pass<G: SheetGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        state: &mut SheetState,
    ) -> Result<bool, TemplateError> {
        tracing::trace!("scan pass");
        state.summary.unresolved = 0;
        for row in grid.row_indices() {
            for col in grid.column_indices(row) {
                let Some(CellContent::Text(text)) = grid.content(row, col) else {
                    continue;
                };
                if !has_token(&text) {
                    continue;
                }
                let found: Vec<String> = tokens(&text).into_iter().map(String::from).collect();
                for token in found {
                    // earlier tokens may have rewritten the cell
                    let Some(CellContent::Text(current)) = grid.content(row, col) else {
                        break;
                    };
                    if !current.contains(token.as_str()) {
                        continue;
                    }
                    let site = Site {
                        row,
                        col,
                        token: &token,
                        text: &current,
                    };
                    if self.resolve(grid, state, &site)? {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    fn resolve<G: SheetGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        state: &mut SheetState,
        site: &Site<'_>,
    ) -> Result<bool, TemplateError> {
        match Placeholder::parse(site.token) {
            // constants must survive until every copy has been made
            Placeholder::Constant(_) => Ok(false),
            Placeholder::Variable { path, directive } => {
                self.resolve_variable(grid, state, site, &path, directive.as_ref())
            }
        }
    }

    fn resolve_variable<G: SheetGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        state: &mut SheetState,
        site: &Site<'_>,
        path: &str,
        directive: Option<&Directive>,
    ) -> Result<bool, TemplateError> {
        if let Some(value) = self.store.get(path) {
            match value {
                Value::List(items) => {
                    tracing::debug!(
                        path,
                        len = items.len(),
                        direction = %self.options.direction,
                        row = site.row,
                        col = site.col,
                        "expanding list"
                    );
                    match self.options.direction {
                        Direction::Vertical => {
                            state.summary.rows_inserted += expand_vertical(
                                grid,
                                &mut state.tracker,
                                site.row,
                                site.col,
                                items,
                                directive,
                            )?;
                        }
                        Direction::Horizontal => {
                            expand_horizontal(grid, site.row, site.col, items, directive);
                        }
                    }
                    state.summary.resolved += 1;
                    return Ok(true);
                }
                value if site.is_whole_cell() => {
                    tracing::debug!(path, kind = value.kind_name(), "writing value");
                    write_value(grid, site.row, site.col, value, directive);
                }
                value => {
                    tracing::debug!(path, kind = value.kind_name(), "replacing inside text");
                    let text = site.text.replace(site.token, &value.to_string());
                    write_text(grid, site.row, site.col, text, directive);
                }
            }
            state.summary.resolved += 1;
            return Ok(false);
        }

        if let Some((root, _)) = self.store.resolve_path(path) {
            let Some(records) = self.store.get(&root).and_then(Value::as_records) else {
                state.warn_once(grid.name(), path, "variable root is not a record array");
                state.summary.unresolved += 1;
                return Ok(false);
            };
            let records = records.to_vec();
            tracing::debug!(%root, records = records.len(), direction = %self.options.direction, "exploding record array");
            match self.options.direction {
                Direction::Vertical => explode_vertical(
                    grid,
                    self.store,
                    &root,
                    &records,
                    site.col,
                    self.options.duplicate_all,
                ),
                Direction::Horizontal => {
                    let rules = BlockRules {
                        duplicate_all: self.options.duplicate_all,
                        strip_repeated_fit: self.options.strip_repeated_fit,
                    };
                    state.summary.rows_inserted += explode_horizontal(
                        grid,
                        &mut state.tracker,
                        self.store,
                        &root,
                        &records,
                        site.row,
                        rules,
                    )?;
                }
            }
            return Ok(true);
        }

        if self.options.remove_non_existent {
            let content = if site.is_whole_cell() {
                CellContent::Blank
            } else {
                CellContent::Text(site.text.replace(site.token, ""))
            };
            tracing::debug!(path, "removing missing variable");
            grid.set_content(site.row, site.col, content);
            state.summary.removed += 1;
        } else {
            state.warn_once(grid.name(), path, "could not find variable");
            state.summary.unresolved += 1;
        }
        Ok(false)
    }
}

/// Replaces every remaining `%"literal"%` with its text. Returns the tokens replaced.
fn settle_constants<G: SheetGrid + ?Sized>(grid: &mut G) -> usize {
    let mut replaced = 0;
    for row in grid.row_indices() {
        for col in grid.column_indices(row) {
            let Some(CellContent::Text(text)) = grid.content(row, col) else {
                continue;
            };
            let count = constant_count(&text);
            if count > 0 {
                let stripped = strip_constants(&text).into_owned();
                grid.set_content(row, col, CellContent::Text(stripped));
                replaced += count;
            }
        }
    }
    tracing::trace!(replaced, "constants settled");
    replaced
}

/// Substitutes every sheet of `doc` in place.
pub fn substitute_document<D: GridDocument>(
    doc: &mut D,
    store: &mut VariableStore,
    options: &SubstituteOptions,
) -> Result<SubstitutionSummary, TemplateError> {
    SubstitutionEngine::new(store, options).run(doc)
}

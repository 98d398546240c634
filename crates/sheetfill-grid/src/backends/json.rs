use crate::error::GridError;
use crate::traits::{BorderSides, CellContent, GridDocument, SaveDestination, SheetGrid};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

const NO_BORDER: &str = "none";

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct JsonStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_left: Option<String>,
}

impl JsonStyle {
    /// Thin border on every side.
    pub fn boxed() -> Self {
        let thin = Some("thin".to_string());
        Self {
            number_format: None,
            border_top: thin.clone(),
            border_right: thin.clone(),
            border_bottom: thin.clone(),
            border_left: thin,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct JsonCell {
    #[serde(default)]
    pub content: CellContent,
    #[serde(default)]
    pub style: JsonStyle,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct JsonSheet {
    pub name: String,
    #[serde(default)]
    pub rows: BTreeMap<u32, BTreeMap<u32, JsonCell>>,
    #[serde(default)]
    pub autosized: BTreeSet<u32>,
}

impl JsonSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, row: u32, col: u32, text: impl Into<String>) -> Self {
        SheetGrid::set_content(&mut self, row, col, CellContent::Text(text.into()));
        self
    }

    pub fn with_cell(mut self, row: u32, col: u32, content: CellContent) -> Self {
        SheetGrid::set_content(&mut self, row, col, content);
        self
    }

    pub fn with_style(mut self, row: u32, col: u32, style: JsonStyle) -> Self {
        self.cell_mut(row, col).style = style;
        self
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&JsonCell> {
        self.rows.get(&row)?.get(&col)
    }

    pub fn style(&self, row: u32, col: u32) -> Option<&JsonStyle> {
        self.cell(row, col).map(|c| &c.style)
    }

    fn cell_mut(&mut self, row: u32, col: u32) -> &mut JsonCell {
        self.rows.entry(row).or_default().entry(col).or_default()
    }
}

impl SheetGrid for JsonSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn row_indices(&self) -> Vec<u32> {
        self.rows
            .iter()
            .filter(|(_, cells)| !cells.is_empty())
            .map(|(r, _)| *r)
            .collect()
    }

    fn column_indices(&self, row: u32) -> Vec<u32> {
        self.rows
            .get(&row)
            .map(|cells| cells.keys().copied().collect())
            .unwrap_or_default()
    }

    fn content(&self, row: u32, col: u32) -> Option<CellContent> {
        self.cell(row, col).map(|c| c.content.clone())
    }

    fn set_content(&mut self, row: u32, col: u32, content: CellContent) {
        self.cell_mut(row, col).content = content;
    }

    fn copy_style(&mut self, from: (u32, u32), to: (u32, u32)) {
        let style = self.style(from.0, from.1).cloned().unwrap_or_default();
        self.cell_mut(to.0, to.1).style = style;
    }

    fn copy_cell(&mut self, from: (u32, u32), to: (u32, u32)) {
        if let Some(cell) = self.cell(from.0, from.1).cloned() {
            *self.cell_mut(to.0, to.1) = cell;
        }
    }

    fn remove_cell(&mut self, row: u32, col: u32) {
        if let Some(cells) = self.rows.get_mut(&row) {
            cells.remove(&col);
            if cells.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    fn clear_borders(&mut self, row: u32, col: u32, sides: BorderSides) {
        let style = &mut self.cell_mut(row, col).style;
        let none = || Some(NO_BORDER.to_string());
        if sides.top {
            style.border_top = none();
        }
        if sides.right {
            style.border_right = none();
        }
        if sides.bottom {
            style.border_bottom = none();
        }
        if sides.left {
            style.border_left = none();
        }
    }

    fn autosize_column(&mut self, col: u32) {
        self.autosized.insert(col);
    }

    fn insert_rows(&mut self, before: u32, count: u32) {
        if count == 0 {
            return;
        }
        let moved = self.rows.split_off(&before);
        for (row, cells) in moved {
            self.rows.insert(row + count, cells);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
struct JsonBook {
    #[serde(default)]
    sheets: Vec<JsonSheet>,
}

/// In-memory document serialized as pretty JSON. Handy for tests and for diffing
/// template output without an xlsx round trip.
#[derive(Debug, Default, Clone)]
pub struct JsonDocument {
    data: JsonBook,
    path: Option<PathBuf>,
}

impl JsonDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sheets(sheets: Vec<JsonSheet>) -> Self {
        Self {
            data: JsonBook { sheets },
            path: None,
        }
    }

    pub fn sheets(&self) -> &[JsonSheet] {
        &self.data.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&JsonSheet> {
        self.data.sheets.get(index)
    }

    pub fn push_sheet(&mut self, sheet: JsonSheet) {
        self.data.sheets.push(sheet);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl GridDocument for JsonDocument {
    type Sheet = JsonSheet;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        let file = File::open(path.as_ref())?;
        let data: JsonBook = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self {
            data,
            path: Some(path.as_ref().to_path_buf()),
        })
    }

    fn open_bytes(data: Vec<u8>) -> Result<Self, GridError> {
        let data: JsonBook = serde_json::from_slice(&data)?;
        Ok(Self { data, path: None })
    }

    fn sheet_count(&self) -> usize {
        self.data.sheets.len()
    }

    fn sheet_mut(&mut self, index: usize) -> Option<&mut JsonSheet> {
        self.data.sheets.get_mut(index)
    }

    fn save_to(&mut self, dest: SaveDestination<'_>) -> Result<Option<Vec<u8>>, GridError> {
        match dest {
            SaveDestination::Path(path) => {
                let mut file = File::create(path)?;
                let s = serde_json::to_string_pretty(&self.data)?;
                file.write_all(s.as_bytes())?;
                self.path = Some(path.to_path_buf());
                Ok(None)
            }
            SaveDestination::Writer(writer) => {
                let s = serde_json::to_string_pretty(&self.data)?;
                writer.write_all(s.as_bytes())?;
                Ok(None)
            }
            SaveDestination::Bytes => Ok(Some(serde_json::to_vec_pretty(&self.data)?)),
        }
    }
}

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Value portion of a cell as the template engine sees it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellContent {
    #[default]
    Blank,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Formula text without the leading `=`.
    Formula(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Blank,
    Text,
    Number,
    Bool,
    Formula,
}

impl CellContent {
    pub fn kind(&self) -> CellKind {
        match self {
            CellContent::Blank => CellKind::Blank,
            CellContent::Text(_) => CellKind::Text,
            CellContent::Number(_) => CellKind::Number,
            CellContent::Bool(_) => CellKind::Bool,
            CellContent::Formula(_) => CellKind::Formula,
        }
    }

    /// Text representation of the cell.
    pub fn text(&self) -> String {
        match self {
            CellContent::Blank => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::Number(n) => n.to_string(),
            CellContent::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellContent::Formula(f) => f.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellContent::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Border sides to strip. Order on the wire is top-right-bottom-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorderSides {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl BorderSides {
    pub fn any(&self) -> bool {
        self.top || self.right || self.bottom || self.left
    }
}

pub enum SaveDestination<'a> {
    Path(&'a Path),
    Writer(&'a mut dyn Write),
    Bytes,
}

/// One sheet of a template document.
///
/// Coordinates are 1-based `(row, col)`. Implementations keep cells sparse: a cell only
/// exists once something created it.
pub trait SheetGrid {
    fn name(&self) -> &str;
    fn rename(&mut self, name: &str);

    /// Occupied row indices, ascending.
    fn row_indices(&self) -> Vec<u32>;
    /// Occupied columns of `row`, ascending.
    fn column_indices(&self, row: u32) -> Vec<u32>;

    /// Last occupied row, 0 for an empty sheet.
    fn last_row(&self) -> u32 {
        self.row_indices().last().copied().unwrap_or(0)
    }

    /// Last occupied column of `row`, 0 for an empty row.
    fn last_column(&self, row: u32) -> u32 {
        self.column_indices(row).last().copied().unwrap_or(0)
    }

    fn last_column_of_sheet(&self) -> u32 {
        self.row_indices()
            .into_iter()
            .map(|r| self.last_column(r))
            .max()
            .unwrap_or(0)
    }

    fn content(&self, row: u32, col: u32) -> Option<CellContent>;

    fn text(&self, row: u32, col: u32) -> Option<String> {
        self.content(row, col).map(|c| c.text())
    }

    /// Writes the value portion, creating the cell if needed. The style is kept.
    fn set_content(&mut self, row: u32, col: u32, content: CellContent);

    fn copy_style(&mut self, from: (u32, u32), to: (u32, u32));

    /// Copies value, type, formula text and style verbatim.
    fn copy_cell(&mut self, from: (u32, u32), to: (u32, u32));

    fn remove_cell(&mut self, row: u32, col: u32);

    fn move_cell(&mut self, from: (u32, u32), to: (u32, u32)) {
        if self.content(from.0, from.1).is_none() {
            return;
        }
        self.copy_cell(from, to);
        self.remove_cell(from.0, from.1);
    }

    /// Sets the given sides to "no border". Other sides are left alone.
    fn clear_borders(&mut self, row: u32, col: u32, sides: BorderSides);

    fn autosize_column(&mut self, col: u32);

    /// Moves every row `>= before` down by `count`.
    fn insert_rows(&mut self, before: u32, count: u32);
}

/// An ordered collection of sheets plus the concrete format's serializer.
pub trait GridDocument {
    type Sheet: SheetGrid;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, GridError>
    where
        Self: Sized;

    fn open_bytes(data: Vec<u8>) -> Result<Self, GridError>
    where
        Self: Sized;

    fn sheet_count(&self) -> usize;

    fn sheet_mut(&mut self, index: usize) -> Option<&mut Self::Sheet>;

    fn sheet_at(&mut self, index: usize) -> Result<&mut Self::Sheet, GridError> {
        self.sheet_mut(index).ok_or(GridError::SheetNotFound(index))
    }

    fn save_to(&mut self, dest: SaveDestination<'_>) -> Result<Option<Vec<u8>>, GridError>;

    fn save_to_bytes(&mut self) -> Result<Vec<u8>, GridError> {
        self.save_to(SaveDestination::Bytes)?
            .ok_or_else(|| GridError::Unsupported("backend returned no bytes".into()))
    }

    fn save_as_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), GridError> {
        self.save_to(SaveDestination::Path(path.as_ref()))?;
        Ok(())
    }
}

/// 1-based column index to A1 letters.
pub fn col_to_a1(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

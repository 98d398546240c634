use crate::error::GridError;
use crate::traits::{BorderSides, CellContent, GridDocument, SaveDestination, SheetGrid};
use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::Path;
use umya_spreadsheet::{Border, Cell, CellRawValue, Spreadsheet, Worksheet, reader, writer};

const BACKEND: &str = "umya";

/// An xlsx workbook held fully in memory.
pub struct UmyaDocument {
    book: Spreadsheet,
}

impl UmyaDocument {
    pub fn from_spreadsheet(book: Spreadsheet) -> Self {
        Self { book }
    }

    fn ensure_sheets_read(&mut self) {
        let count = self.book.get_sheet_count();
        for i in 0..count {
            self.book.read_sheet(i);
        }
    }

    fn write_bytes(&mut self) -> Result<Vec<u8>, GridError> {
        self.ensure_sheets_read();
        for sheet in self.book.get_sheet_collection_mut() {
            sheet.calculation_auto_width();
        }
        let mut buf = Cursor::new(Vec::new());
        writer::xlsx::write_writer(&self.book, &mut buf)
            .map_err(|e| GridError::from_backend(BACKEND, e))?;
        Ok(buf.into_inner())
    }
}

impl GridDocument for UmyaDocument {
    type Sheet = Worksheet;

    fn open_path<P: AsRef<Path>>(path: P) -> Result<Self, GridError> {
        // Full read so the writer never meets an undeserialized sheet
        let book =
            reader::xlsx::read(path.as_ref()).map_err(|e| GridError::from_backend(BACKEND, e))?;
        tracing::debug!(
            path = %path.as_ref().display(),
            sheets = book.get_sheet_count(),
            "opened workbook"
        );
        Ok(Self::from_spreadsheet(book))
    }

    fn open_bytes(data: Vec<u8>) -> Result<Self, GridError> {
        let book = reader::xlsx::read_reader(Cursor::new(data), true)
            .map_err(|e| GridError::from_backend(BACKEND, e))?;
        Ok(Self::from_spreadsheet(book))
    }

    fn sheet_count(&self) -> usize {
        self.book.get_sheet_count()
    }

    fn sheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        if index >= self.book.get_sheet_count() {
            return None;
        }
        self.book.read_sheet(index);
        self.book.get_sheet_collection_mut().get_mut(index)
    }

    fn save_to(&mut self, dest: SaveDestination<'_>) -> Result<Option<Vec<u8>>, GridError> {
        match dest {
            SaveDestination::Path(p) => {
                let bytes = self.write_bytes()?;
                std::fs::write(p, bytes)?;
                Ok(None)
            }
            SaveDestination::Writer(w) => {
                let bytes = self.write_bytes()?;
                w.write_all(&bytes)?;
                w.flush()?;
                Ok(None)
            }
            SaveDestination::Bytes => Ok(Some(self.write_bytes()?)),
        }
    }
}

fn cell_content(cell: &Cell) -> CellContent {
    let cv = cell.get_cell_value();
    if cv.is_formula() {
        let f = cv.get_formula();
        return CellContent::Formula(f.strip_prefix('=').unwrap_or(f).to_string());
    }
    match cv.get_raw_value() {
        CellRawValue::Numeric(n) => CellContent::Number(*n),
        CellRawValue::Bool(b) => CellContent::Bool(*b),
        CellRawValue::String(s) => CellContent::Text(s.to_string()),
        CellRawValue::RichText(rt) => CellContent::Text(rt.get_text().to_string()),
        CellRawValue::Lazy(s) => {
            let txt: &str = s.as_ref();
            if let Ok(n) = txt.parse::<f64>() {
                CellContent::Number(n)
            } else if txt.eq_ignore_ascii_case("TRUE") {
                CellContent::Bool(true)
            } else if txt.eq_ignore_ascii_case("FALSE") {
                CellContent::Bool(false)
            } else {
                CellContent::Text(txt.to_string())
            }
        }
        CellRawValue::Error(_) => CellContent::Text(cv.get_value().to_string()),
        CellRawValue::Empty => CellContent::Blank,
    }
}

fn write_content(cell: &mut Cell, content: CellContent) {
    cell.get_cell_value_mut().remove_formula();
    match content {
        CellContent::Blank => {
            cell.set_blank();
        }
        CellContent::Text(s) => {
            cell.set_value_string(s);
        }
        CellContent::Number(n) => {
            cell.set_value_number(n);
        }
        CellContent::Bool(b) => {
            cell.set_value_bool(b);
        }
        CellContent::Formula(f) => {
            cell.set_formula(f);
            cell.set_formula_result_default("");
        }
    }
}

/// umya addresses cells as `(col, row)`; the grid contract is `(row, col)`.
impl SheetGrid for Worksheet {
    fn name(&self) -> &str {
        self.get_name()
    }

    fn rename(&mut self, name: &str) {
        self.set_name(name);
    }

    fn row_indices(&self) -> Vec<u32> {
        let rows: BTreeSet<u32> = self
            .get_cell_collection()
            .into_iter()
            .map(|c| *c.get_coordinate().get_row_num())
            .collect();
        rows.into_iter().collect()
    }

    fn column_indices(&self, row: u32) -> Vec<u32> {
        // indexed by row and already sorted by column
        self.get_collection_by_row(&row)
            .into_iter()
            .map(|c| *c.get_coordinate().get_col_num())
            .collect()
    }

    fn content(&self, row: u32, col: u32) -> Option<CellContent> {
        self.get_cell((col, row)).map(cell_content)
    }

    fn set_content(&mut self, row: u32, col: u32, content: CellContent) {
        write_content(self.get_cell_mut((col, row)), content);
    }

    fn copy_style(&mut self, from: (u32, u32), to: (u32, u32)) {
        let style = self
            .get_cell((from.1, from.0))
            .map(|c| c.get_style().clone())
            .unwrap_or_default();
        self.get_cell_mut((to.1, to.0)).set_style(style);
    }

    fn copy_cell(&mut self, from: (u32, u32), to: (u32, u32)) {
        let Some(src) = self.get_cell((from.1, from.0)) else {
            return;
        };
        let content = cell_content(src);
        let style = src.get_style().clone();
        let dest = self.get_cell_mut((to.1, to.0));
        dest.set_style(style);
        write_content(dest, content);
    }

    fn remove_cell(&mut self, row: u32, col: u32) {
        Worksheet::remove_cell(self, (col, row));
    }

    fn clear_borders(&mut self, row: u32, col: u32, sides: BorderSides) {
        let borders = self.get_cell_mut((col, row)).get_style_mut().get_borders_mut();
        if sides.top {
            borders.get_top_mut().set_border_style(Border::BORDER_NONE);
        }
        if sides.right {
            borders.get_right_mut().set_border_style(Border::BORDER_NONE);
        }
        if sides.bottom {
            borders.get_bottom_mut().set_border_style(Border::BORDER_NONE);
        }
        if sides.left {
            borders.get_left_mut().set_border_style(Border::BORDER_NONE);
        }
    }

    fn autosize_column(&mut self, col: u32) {
        self.get_column_dimension_by_number_mut(&col)
            .set_auto_width(true);
    }

    fn insert_rows(&mut self, before: u32, count: u32) {
        if count == 0 {
            return;
        }
        self.insert_new_row(&before, &count);
    }
}

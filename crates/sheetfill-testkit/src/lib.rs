use sheetfill_grid::{GridDocument, JsonDocument, JsonSheet};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use umya_spreadsheet::Spreadsheet;

/// A file in a temporary directory that lives as long as the fixture.
pub struct Fixture {
    dir: TempDir,
    path: PathBuf,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A sibling path in the same temporary directory, for outputs.
    pub fn sibling(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Writes a fresh workbook (one sheet named `Sheet1`) after `f` populated it.
pub fn build_workbook<F: FnOnce(&mut Spreadsheet)>(f: F) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("template.xlsx");
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, &path).expect("write xlsx fixture");
    Fixture { dir, path }
}

/// Writes the given sheets as a JSON grid template.
pub fn build_json_template(sheets: Vec<JsonSheet>) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("template.json");
    let mut doc = JsonDocument::from_sheets(sheets);
    doc.save_as_path(&path).expect("write json fixture");
    Fixture { dir, path }
}

pub fn read_workbook(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).expect("read xlsx output")
}

pub fn read_json(path: &Path) -> JsonDocument {
    JsonDocument::open_path(path).expect("read json output")
}

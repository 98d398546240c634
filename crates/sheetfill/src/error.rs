use sheetfill_grid::GridError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unknown template type '{}', expecting xlsx or json", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("unsupported template format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Re-keying the row shift bookkeeping mapped two rows onto the same index.
    #[error("row shift bookkeeping collided at row {key} while inserting after row {row}")]
    ShiftCollision { row: u32, key: u32 },

    #[error("sheet {0} disappeared during substitution")]
    SheetMissing(usize),

    #[error("invalid variables: {0}")]
    Variables(String),
}

impl From<serde_json::Error> for TemplateError {
    fn from(err: serde_json::Error) -> Self {
        TemplateError::Variables(err.to_string())
    }
}

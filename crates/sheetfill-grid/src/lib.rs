pub mod backends;
pub mod error;
pub mod traits;

#[cfg(feature = "json")]
pub use backends::JsonDocument;
#[cfg(feature = "umya")]
pub use backends::UmyaDocument;
#[cfg(feature = "json")]
pub use backends::json::{JsonCell, JsonSheet, JsonStyle};
pub use error::GridError;
pub use traits::{
    BorderSides, CellContent, CellKind, GridDocument, SaveDestination, SheetGrid, col_to_a1,
};

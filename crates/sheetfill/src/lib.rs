//! Spreadsheet templates with `%placeholder%` tokens.
//!
//! ```no_run
//! use sheetfill::{SubstituteOptions, Template, VariableStore};
//!
//! let mut vars = VariableStore::new();
//! vars.insert("title", "Quarterly report");
//! vars.insert("months", vec!["Jan", "Feb", "Mar"]);
//!
//! let template = Template::open("report.xlsx")?;
//! let summary = template.substitute_to_path("out.xlsx", &mut vars, &SubstituteOptions::default())?;
//! assert!(summary.is_complete());
//! # Ok::<(), sheetfill::TemplateError>(())
//! ```

pub mod engine;
pub mod error;
pub mod expand;
pub mod explode;
pub mod options;
pub mod placeholder;
pub mod shift;
pub mod store;
pub mod summary;
pub mod template;
pub mod writer;

pub use engine::{SubstitutionEngine, substitute_document};
pub use error::TemplateError;
pub use options::{Direction, SubstituteOptions};
pub use placeholder::{Directive, Fit, Placeholder};
pub use shift::ShiftTracker;
pub use store::VariableStore;
pub use summary::{SheetSummary, SubstitutionSummary};
pub use template::{Substitution, Template, TemplateFormat};

// Re-export for convenience
pub use sheetfill_common::{Record, Value};
pub use sheetfill_grid::{GridDocument, JsonDocument, SheetGrid, UmyaDocument};

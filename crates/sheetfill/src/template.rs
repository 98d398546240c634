use crate::engine::substitute_document;
use crate::error::TemplateError;
use crate::options::SubstituteOptions;
use crate::store::VariableStore;
use crate::summary::SubstitutionSummary;
use sheetfill_grid::{GridDocument, JsonDocument, SaveDestination, UmyaDocument};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Concrete document format of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateFormat {
    /// Office Open XML workbook (`.xlsx`, `.xlsm`).
    Xlsx,
    /// Sparse JSON grid as written by [`JsonDocument`].
    Json,
}

impl TemplateFormat {
    /// Detects the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, TemplateError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(Self::Xlsx),
            Some("json") => Ok(Self::Json),
            Some("xls") => Err(TemplateError::UnsupportedFormat(format!(
                "legacy binary workbook '{}' must be converted to xlsx first",
                path.display()
            ))),
            _ => Err(TemplateError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Output of [`Template::substitute`]: the serialized document plus what happened.
#[derive(Debug, Clone)]
pub struct Substitution {
    pub format: TemplateFormat,
    pub document: Vec<u8>,
    pub summary: SubstitutionSummary,
}

/// A template document on disk or in memory.
///
/// The source is read afresh for every substitution, so one `Template` can render any
/// number of outputs.
#[derive(Debug, Clone)]
pub struct Template {
    source: Source,
    format: TemplateFormat,
}

impl Template {
    /// Binds a template file. Only the extension is checked here; the file is opened
    /// when substituting.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let format = TemplateFormat::from_path(path)?;
        tracing::debug!(path = %path.display(), ?format, "loading template");
        Ok(Self {
            source: Source::Path(path.to_path_buf()),
            format,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>, format: TemplateFormat) -> Self {
        Self {
            source: Source::Bytes(bytes),
            format,
        }
    }

    pub fn format(&self) -> TemplateFormat {
        self.format
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Path(p) => Some(p),
            Source::Bytes(_) => None,
        }
    }

    /// Fills the template and returns the serialized result.
    ///
    /// `variables` grows with the flattened record arrays.
    pub fn substitute(
        &self,
        variables: &mut VariableStore,
        options: &SubstituteOptions,
    ) -> Result<Substitution, TemplateError> {
        let (document, summary) = self.render(variables, options, SaveDestination::Bytes)?;
        Ok(Substitution {
            format: self.format,
            document: document.unwrap_or_default(),
            summary,
        })
    }

    /// [`Template::substitute`] with the stock options: duplicate every cell, grow
    /// vertically, keep unresolved placeholders.
    pub fn substitute_default(
        &self,
        variables: &mut VariableStore,
    ) -> Result<Substitution, TemplateError> {
        self.substitute(variables, &SubstituteOptions::default())
    }

    pub fn substitute_to_path(
        &self,
        target: impl AsRef<Path>,
        variables: &mut VariableStore,
        options: &SubstituteOptions,
    ) -> Result<SubstitutionSummary, TemplateError> {
        let (_, summary) =
            self.render(variables, options, SaveDestination::Path(target.as_ref()))?;
        Ok(summary)
    }

    pub fn substitute_to_writer(
        &self,
        target: &mut dyn Write,
        variables: &mut VariableStore,
        options: &SubstituteOptions,
    ) -> Result<SubstitutionSummary, TemplateError> {
        let (_, summary) = self.render(variables, options, SaveDestination::Writer(target))?;
        Ok(summary)
    }

    fn render(
        &self,
        variables: &mut VariableStore,
        options: &SubstituteOptions,
        dest: SaveDestination<'_>,
    ) -> Result<(Option<Vec<u8>>, SubstitutionSummary), TemplateError> {
        match self.format {
            TemplateFormat::Xlsx => {
                let doc: UmyaDocument = self.load()?;
                fill_and_save(doc, variables, options, dest)
            }
            TemplateFormat::Json => {
                let doc: JsonDocument = self.load()?;
                fill_and_save(doc, variables, options, dest)
            }
        }
    }

    fn load<D: GridDocument>(&self) -> Result<D, TemplateError> {
        let doc = match &self.source {
            Source::Path(p) => D::open_path(p)?,
            Source::Bytes(b) => D::open_bytes(b.clone())?,
        };
        Ok(doc)
    }
}

/// Nothing is written unless every sheet reached its fixed point.
fn fill_and_save<D: GridDocument>(
    mut doc: D,
    variables: &mut VariableStore,
    options: &SubstituteOptions,
    dest: SaveDestination<'_>,
) -> Result<(Option<Vec<u8>>, SubstitutionSummary), TemplateError> {
    let summary = substitute_document(&mut doc, variables, options)?;
    let bytes = doc.save_to(dest)?;
    Ok((bytes, summary))
}

//! Document generation: plan record in, downloadable artifacts out.
//!
//! # Responsibility
//! - Transform a completed plan record into two PDFs and one spreadsheet.
//! - Keep templating, PDF rasterization and spreadsheet writing behind
//!   narrow seams so the host can swap the backends.
//!
//! # Invariants
//! - Generation never mutates the source record.
//! - A failed generation returns no partial artifact references.

pub mod generator;
pub mod pdf;
pub mod spreadsheet;
pub mod template;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Template or rasterization failure during document generation.
#[derive(Debug)]
pub enum RenderError {
    /// The narrative template file could not be resolved.
    TemplateNotFound(PathBuf),
    /// Template compilation or rendering failed, including references to
    /// fields the context does not provide.
    Template(minijinja::Error),
    /// The configured font family could not be loaded. Surfaced instead of
    /// silently dropping glyphs the built-in PDF fonts cannot shape.
    Font {
        family: String,
        source: genpdf::error::Error,
    },
    /// PDF document assembly or rasterization failed.
    Pdf(genpdf::error::Error),
    /// Workbook construction failed.
    Spreadsheet(rust_xlsxwriter::XlsxError),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound(path) => {
                write!(f, "narrative template not found at `{}`", path.display())
            }
            Self::Template(err) => write!(f, "narrative template failed: {err}"),
            Self::Font { family, source } => {
                write!(f, "font family `{family}` could not be loaded: {source}")
            }
            Self::Pdf(err) => write!(f, "pdf rendering failed: {err}"),
            Self::Spreadsheet(err) => write!(f, "spreadsheet writing failed: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TemplateNotFound(_) => None,
            Self::Template(err) => Some(err),
            Self::Font { source, .. } => Some(source),
            Self::Pdf(err) => Some(err),
            Self::Spreadsheet(err) => Some(err),
        }
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(value: minijinja::Error) -> Self {
        Self::Template(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for RenderError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet(value)
    }
}

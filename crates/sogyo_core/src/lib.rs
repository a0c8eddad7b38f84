//! Core domain logic for the founding-plan generator.
//! This crate is the single source of truth for plan state and document
//! generation; the interactive host only binds widgets to it.

pub mod docgen;
pub mod logging;
pub mod model;
pub mod session;

pub use docgen::generator::{
    compute_projection, ephemeral_output_dir, ComputedProjection, ComputedRow, DocumentGenerator,
    GenerateError, PlanArtifacts, GROSS_PROFIT_LABEL, NARRATIVE_PDF_FILE, PROJECTION_PDF_FILE,
    SPREADSHEET_FILE,
};
pub use docgen::pdf::{Block, DocumentContent, GenpdfEngine, PdfEngine};
pub use docgen::template::NarrativeTemplates;
pub use docgen::RenderError;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::plan::{Employee, PlanRecord, PlanValidationError, PAYROLL_FLOOR_YEN};
pub use model::projection::{
    year_label, ProjectionColumn, ProjectionError, ProjectionRow, ProjectionTable, YEAR_COUNT,
};
pub use session::snapshot::ParseError;
pub use session::store::PlanSession;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

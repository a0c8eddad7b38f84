//! Plan-to-artifacts generation pipeline.
//!
//! # Responsibility
//! - Compute the derived projection columns on a copy of the table.
//! - Drive templating, PDF rasterization and spreadsheet writing, then
//!   place the three artifacts into the caller's output directory.
//!
//! # Invariants
//! - The source record is never mutated; derived columns exist only in the
//!   generation-time copy.
//! - Creating an already existing output directory is not an error.

use crate::docgen::pdf::{Block, DocumentContent, PdfEngine};
use crate::docgen::spreadsheet::projection_workbook;
use crate::docgen::template::NarrativeTemplates;
use crate::docgen::RenderError;
use crate::model::plan::PlanRecord;
use crate::model::projection::{year_label, ProjectionColumn, ProjectionTable};
use log::{info, warn};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::{fs, io};

/// File name of the narrative plan PDF.
pub const NARRATIVE_PDF_FILE: &str = "plan.pdf";
/// File name of the financial projection PDF.
pub const PROJECTION_PDF_FILE: &str = "projection.pdf";
/// File name of the spreadsheet export.
pub const SPREADSHEET_FILE: &str = "plan.xlsx";

/// Label of the derived gross-profit column.
pub const GROSS_PROFIT_LABEL: &str = "売上総利益";

/// Document title of the narrative plan PDF.
const NARRATIVE_TITLE: &str = "創業計画書";
/// Document title and heading of the projection PDF.
const PROJECTION_TITLE: &str = "10年間の収支計画";

/// Generation failure. No partial artifact references are returned.
#[derive(Debug)]
pub enum GenerateError {
    /// Template or rasterization failure.
    Render(RenderError),
    /// The output location could not be created or written. Hosts are
    /// expected to retry into [`ephemeral_output_dir`] rather than surface
    /// a raw filesystem error to the end user.
    Io { path: PathBuf, source: io::Error },
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(err) => write!(f, "{err}"),
            Self::Io { path, source } => {
                write!(f, "cannot write `{}`: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<RenderError> for GenerateError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

/// Projection copy extended with derived columns for output documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedProjection {
    /// Column labels: the editable set plus the derived gross profit.
    pub columns: Vec<String>,
    /// One entry per year, values aligned with `columns`.
    pub rows: Vec<ComputedRow>,
}

/// One output row of a [`ComputedProjection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedRow {
    pub year: String,
    pub values: Vec<i64>,
}

/// Copies the table and appends the gross-profit column
/// (`売上総利益 = 売上高 − 売上原価`, row-wise). Pure and deterministic.
pub fn compute_projection(table: &ProjectionTable) -> ComputedProjection {
    let mut columns: Vec<String> = ProjectionColumn::ALL
        .iter()
        .map(|column| column.label().to_string())
        .collect();
    columns.push(GROSS_PROFIT_LABEL.to_string());

    let rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let mut values: Vec<i64> = ProjectionColumn::ALL
                .iter()
                .map(|column| row.cell(*column))
                .collect();
            values.push(row.revenue - row.cost_of_goods);
            ComputedRow {
                year: year_label(index),
                values,
            }
        })
        .collect();

    ComputedProjection { columns, rows }
}

/// References to the three generated artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanArtifacts {
    pub narrative_pdf: PathBuf,
    pub projection_pdf: PathBuf,
    pub spreadsheet: PathBuf,
}

/// Always-writable fallback output location for hosts whose primary output
/// directory is not writable in the execution sandbox.
pub fn ephemeral_output_dir() -> PathBuf {
    std::env::temp_dir().join("sogyo-plan")
}

/// Document generator: one record in, three artifact files out.
pub struct DocumentGenerator<E: PdfEngine> {
    engine: E,
    templates: NarrativeTemplates,
}

impl<E: PdfEngine> DocumentGenerator<E> {
    /// Creates a generator using the built-in narrative template.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            templates: NarrativeTemplates::builtin(),
        }
    }

    /// Creates a generator with caller-provided templates.
    pub fn with_templates(engine: E, templates: NarrativeTemplates) -> Self {
        Self { engine, templates }
    }

    /// Renders the narrative PDF, the projection PDF and the spreadsheet
    /// into `output_dir`, creating the directory if absent.
    ///
    /// All three artifacts are fully rendered in memory before the first
    /// file write, so a render failure leaves nothing half-written.
    pub fn generate(
        &self,
        record: &PlanRecord,
        output_dir: &Path,
    ) -> Result<PlanArtifacts, GenerateError> {
        let computed = compute_projection(&record.projection);

        let narrative_text = self.templates.render_narrative(record)?;
        let narrative_pdf = self
            .engine
            .render(&narrative_document(&narrative_text, &computed))?;
        let projection_pdf = self.engine.render(&projection_document(&computed))?;
        let workbook = projection_workbook(&computed)?;

        fs::create_dir_all(output_dir).map_err(|source| GenerateError::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let artifacts = PlanArtifacts {
            narrative_pdf: output_dir.join(NARRATIVE_PDF_FILE),
            projection_pdf: output_dir.join(PROJECTION_PDF_FILE),
            spreadsheet: output_dir.join(SPREADSHEET_FILE),
        };
        write_artifact(&artifacts.narrative_pdf, &narrative_pdf)?;
        write_artifact(&artifacts.projection_pdf, &projection_pdf)?;
        write_artifact(&artifacts.spreadsheet, &workbook)?;

        info!(
            "event=plan_generate module=docgen status=ok output_dir={}",
            output_dir.display()
        );
        Ok(artifacts)
    }
}

fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), GenerateError> {
    fs::write(path, bytes).map_err(|source| {
        warn!(
            "event=plan_generate module=docgen status=error path={} error={source}",
            path.display()
        );
        GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Assembles the narrative document: templated sections (lines marked `■`
/// become headings) followed by the ten-year table.
fn narrative_document(narrative_text: &str, computed: &ComputedProjection) -> DocumentContent {
    let mut blocks = Vec::new();
    for line in narrative_text.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            blocks.push(Block::Spacer);
        } else if let Some(heading) = trimmed.strip_prefix("■") {
            blocks.push(Block::Heading(heading.trim().to_string()));
        } else {
            blocks.push(Block::Paragraph(trimmed.to_string()));
        }
    }
    blocks.push(Block::Spacer);
    blocks.push(Block::Heading(PROJECTION_TITLE.to_string()));
    blocks.push(table_block(computed));

    DocumentContent {
        title: NARRATIVE_TITLE.to_string(),
        blocks,
    }
}

/// Assembles the standalone projection document.
fn projection_document(computed: &ComputedProjection) -> DocumentContent {
    DocumentContent {
        title: PROJECTION_TITLE.to_string(),
        blocks: vec![table_block(computed)],
    }
}

fn table_block(computed: &ComputedProjection) -> Block {
    let mut header = vec![String::new()];
    header.extend(computed.columns.iter().cloned());
    let rows = computed
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.year.clone()];
            cells.extend(row.values.iter().map(|value| value.to_string()));
            cells
        })
        .collect();
    Block::Table { header, rows }
}

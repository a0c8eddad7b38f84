//! PDF rasterization seam and the genpdf-backed default engine.
//!
//! # Responsibility
//! - Define the narrow document-to-bytes contract the generator renders
//!   through.
//! - Provide the default engine with an explicitly configured font family.
//!
//! # Invariants
//! - The engine never falls back to the PDF built-in Latin fonts: the plan
//!   text is Japanese and a font that cannot shape it must fail loudly.

use crate::docgen::RenderError;
use genpdf::{elements, fonts, style, Document, Element as _, SimplePageDecorator};
use std::path::PathBuf;

/// Logical paginated document handed to a [`PdfEngine`].
///
/// Deliberately layout-free: headings, paragraphs and one table shape are
/// all the generator needs, and keeping the contract this small is what
/// makes the rasterizer swappable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    pub title: String,
    pub blocks: Vec<Block>,
}

/// One content block of a [`DocumentContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Spacer,
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

/// Document-to-bytes rasterization contract.
///
/// Implementations must render the full input character set or fail with a
/// [`RenderError`]; silently dropped glyphs are not acceptable output.
pub trait PdfEngine {
    fn render(&self, content: &DocumentContent) -> Result<Vec<u8>, RenderError>;
}

/// Default engine rendering through `genpdf` with a caller-supplied font.
///
/// The font directory must contain `<family>-Regular.ttf`,
/// `<family>-Bold.ttf`, `<family>-Italic.ttf` and `<family>-BoldItalic.ttf`
/// capable of shaping the plan's script (e.g. IPAexGothic or Noto Sans JP).
pub struct GenpdfEngine {
    font_dir: PathBuf,
    font_family: String,
}

impl GenpdfEngine {
    pub fn new(font_dir: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self {
            font_dir: font_dir.into(),
            font_family: font_family.into(),
        }
    }

    fn load_fonts(&self) -> Result<fonts::FontFamily<fonts::FontData>, RenderError> {
        fonts::from_files(&self.font_dir, &self.font_family, None).map_err(|source| {
            RenderError::Font {
                family: self.font_family.clone(),
                source,
            }
        })
    }
}

impl PdfEngine for GenpdfEngine {
    fn render(&self, content: &DocumentContent) -> Result<Vec<u8>, RenderError> {
        let mut doc = Document::new(self.load_fonts()?);
        doc.set_title(content.title.as_str());
        doc.set_font_size(10);
        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(15);
        doc.set_page_decorator(decorator);

        doc.push(
            elements::Paragraph::new(content.title.as_str())
                .styled(style::Style::new().bold().with_font_size(16)),
        );
        doc.push(elements::Break::new(1.0));

        for block in &content.blocks {
            match block {
                Block::Heading(text) => doc.push(
                    elements::Paragraph::new(text.as_str())
                        .styled(style::Style::new().bold().with_font_size(12)),
                ),
                Block::Paragraph(text) => doc.push(elements::Paragraph::new(text.as_str())),
                Block::Spacer => doc.push(elements::Break::new(1.0)),
                Block::Table { header, rows } => {
                    doc.push(render_table(header, rows)?);
                }
            }
        }

        let mut bytes = Vec::new();
        doc.render(&mut bytes).map_err(RenderError::Pdf)?;
        Ok(bytes)
    }
}

fn render_table(
    header: &[String],
    rows: &[Vec<String>],
) -> Result<elements::TableLayout, RenderError> {
    let mut table = elements::TableLayout::new(vec![1; header.len()]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let mut head = table.row();
    for cell in header {
        head.push_element(
            elements::Paragraph::new(cell.as_str()).styled(style::Style::new().bold()),
        );
    }
    head.push().map_err(RenderError::Pdf)?;

    for row in rows {
        let mut layout_row = table.row();
        for cell in row {
            layout_row.push_element(elements::Paragraph::new(cell.as_str()));
        }
        layout_row.push().map_err(RenderError::Pdf)?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::GenpdfEngine;
    use crate::docgen::pdf::{DocumentContent, PdfEngine};
    use crate::docgen::RenderError;

    #[test]
    fn missing_font_directory_fails_as_font_error() {
        let engine = GenpdfEngine::new("/nonexistent/fonts", "IPAexGothic");
        let content = DocumentContent {
            title: "創業計画書".to_string(),
            blocks: Vec::new(),
        };
        let err = engine.render(&content).unwrap_err();
        assert!(matches!(err, RenderError::Font { .. }));
        assert!(err.to_string().contains("IPAexGothic"));
    }
}

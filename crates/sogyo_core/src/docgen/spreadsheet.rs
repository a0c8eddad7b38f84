//! Spreadsheet export of the computed projection.
//!
//! # Responsibility
//! - Write the computed projection (derived columns included) to a single
//!   xlsx worksheet in memory.
//!
//! # Invariants
//! - Header row holds column labels; first column holds year labels.
//! - Cells carry raw numbers; currency formatting stays in the interactive
//!   view, never in the export.

use crate::docgen::generator::ComputedProjection;
use crate::docgen::RenderError;
use rust_xlsxwriter::Workbook;

/// Sheet name of the single projection worksheet.
pub const SHEET_NAME: &str = "収支計画";

/// Builds the xlsx workbook bytes for one computed projection.
pub fn projection_workbook(projection: &ComputedProjection) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, label) in projection.columns.iter().enumerate() {
        sheet.write_string(0, (col + 1) as u16, label)?;
    }
    for (row_index, row) in projection.rows.iter().enumerate() {
        let excel_row = (row_index + 1) as u32;
        sheet.write_string(excel_row, 0, &row.year)?;
        for (col, value) in row.values.iter().enumerate() {
            sheet.write_number(excel_row, (col + 1) as u16, *value as f64)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

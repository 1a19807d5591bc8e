//! Excel exporter implementation - validation report → .xlsx

use crate::core::dates::datetime_to_excel_serial;
use crate::core::ValidationReport;
use crate::error::{ShiftError, ShiftResult};
use crate::types::{CellValue, Sheet};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

pub const SHIFT_DATA_SHEET: &str = "Shift Data";
pub const SUMMARY_SHEET: &str = "Summary";

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel exporter for validation reports
pub struct ExcelExporter<'a> {
    report: &'a ValidationReport,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(report: &'a ValidationReport) -> Self {
        Self { report }
    }

    /// The sheets that will be written, in workbook order
    pub fn sheets(&self) -> Vec<Sheet> {
        vec![
            self.report.annotated_sheet(SHIFT_DATA_SHEET),
            self.report.summary_sheet(SUMMARY_SHEET),
        ]
    }

    /// Export the report to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> ShiftResult<()> {
        let mut workbook = Workbook::new();

        for sheet in self.sheets() {
            Self::export_sheet(&mut workbook, &sheet)?;
        }

        workbook.save(output_path).map_err(|e| {
            ShiftError::Export(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        info!(path = %output_path.display(), "wrote report");
        Ok(())
    }

    /// Export a single sheet to a worksheet
    fn export_sheet(workbook: &mut Workbook, sheet: &Sheet) -> ShiftResult<()> {
        let header_format = Format::new().set_bold();
        let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| ShiftError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (col_idx, header) in sheet.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col_idx as u16, header, &header_format)
                .map_err(|e| ShiftError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            // +1 for header row
            let excel_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                Self::write_cell(worksheet, excel_row, col_idx as u16, cell, &datetime_format)?;
            }
        }

        worksheet.autofit();
        Ok(())
    }

    fn write_cell(
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        cell: &CellValue,
        datetime_format: &Format,
    ) -> ShiftResult<()> {
        let result = match cell {
            CellValue::Empty => return Ok(()),
            CellValue::Text(s) if s.is_empty() => return Ok(()),
            CellValue::Text(s) => worksheet.write_string(row, col, s),
            CellValue::Number(n) => worksheet.write_number(row, col, *n),
            CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            CellValue::DateTime(dt) => worksheet.write_number_with_format(
                row,
                col,
                datetime_to_excel_serial(dt),
                datetime_format,
            ),
        };

        result.map_err(|e| {
            ShiftError::Export(format!(
                "Failed to write cell at row {}, column {}: {}",
                row + 1,
                col + 1,
                e
            ))
        })?;
        Ok(())
    }
}

//! Excel import/export
//!
//! - Import: input workbook (.xlsx/.xlsm/.xls/.ods) → claim and time entry sheets
//! - Export: validation report → .xlsx with "Shift Data" and "Summary" sheets

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, SHIFT_DATA_SHEET, SUMMARY_SHEET};
pub use importer::{
    convert_cell, is_supported_input, range_to_sheet, ExcelImporter, InputWorkbook,
    SUPPORTED_EXTENSIONS,
};

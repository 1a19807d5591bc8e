//! Excel importer implementation - workbook → claim and time entry sheets

use crate::config::WorkbookLayout;
use crate::error::{ShiftError, ShiftResult};
use crate::types::{CellValue, Sheet};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extensions the importer can open
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// The two sheets a validation run needs
#[derive(Debug, Clone, PartialEq)]
pub struct InputWorkbook {
    pub shift_data: Sheet,
    pub time_entries: Sheet,
}

/// Excel importer for shift allowance workbooks
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read the claim sheet and the time entry sheet named by `layout`
    pub fn import(&self, layout: &WorkbookLayout) -> ShiftResult<InputWorkbook> {
        let mut workbook = self.open()?;

        let shift_data = Self::read_sheet(&mut workbook, &layout.shift_sheet)?;
        let time_entries = Self::read_sheet(&mut workbook, &layout.time_sheet)?;

        info!(
            path = %self.path.display(),
            shift_rows = shift_data.row_count(),
            time_rows = time_entries.row_count(),
            "imported workbook"
        );

        Ok(InputWorkbook {
            shift_data,
            time_entries,
        })
    }

    /// Names of all worksheets, in workbook order
    pub fn sheet_names(&self) -> ShiftResult<Vec<String>> {
        Ok(self.open()?.sheet_names())
    }

    fn open(&self) -> ShiftResult<Sheets<BufReader<File>>> {
        open_workbook_auto(&self.path).map_err(|e| {
            ShiftError::Workbook(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn read_sheet(workbook: &mut Sheets<BufReader<File>>, name: &str) -> ShiftResult<Sheet> {
        if !workbook.sheet_names().iter().any(|n| n == name) {
            return Err(ShiftError::MissingSheet {
                sheet: name.to_string(),
            });
        }

        let range = workbook.worksheet_range(name).map_err(|e| {
            ShiftError::Workbook(format!("Failed to read worksheet '{}': {}", name, e))
        })?;

        Ok(range_to_sheet(name, &range))
    }
}

/// Convert a worksheet range to a [`Sheet`]
///
/// The first row of the used range is the header row. Rows with no content
/// at all are skipped.
pub fn range_to_sheet(name: &str, range: &Range<Data>) -> Sheet {
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(header_name).collect(),
        None => return Sheet::new(name, Vec::new()),
    };

    let mut sheet = Sheet::new(name, headers);
    let mut skipped = 0;
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(convert_cell).collect();
        if cells.iter().all(|c| matches!(c, CellValue::Empty)) {
            skipped += 1;
            continue;
        }
        sheet.push_row(cells);
    }

    if skipped > 0 {
        debug!(sheet = name, skipped, "skipped empty rows");
    }
    sheet
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => convert_cell(other).to_text(),
    }
}

/// Convert a calamine cell to a [`CellValue`]
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_iso_datetime(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// True when `path` has an extension the importer can open
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

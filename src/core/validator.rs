//! Shift validation: claimed shift days against the attendance log
//!
//! Pure transform. Takes the shift claim sheet and the time entry sheet,
//! returns per-record results plus summary totals. Nothing here touches the
//! filesystem.

use super::attendance::AttendanceLog;
use super::tokens::{count_day_tokens, normalize_day_tokens};
use crate::config::WorkbookLayout;
use crate::error::ShiftResult;
use crate::types::{CellValue, Sheet};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info};

pub const SHIFT_B_VALID: &str = "Shift B Valid";
pub const MISSING_SHIFT_B: &str = "Missing Shift B Dates";
pub const SHIFT_C_VALID: &str = "Shift C Valid";
pub const MISSING_SHIFT_C: &str = "Missing Shift C Dates";
pub const TOTAL_SHIFT_B: &str = "Total Shift B Days";
pub const TOTAL_SHIFT_C: &str = "Total Shift C Days";
pub const TOTAL_SHIFT: &str = "Total Shift Days";

pub const SUMMARY_RESOURCES: &str = "Total number of resources";
pub const SUMMARY_SHIFT_B: &str = "Total number of Shift B days";
pub const SUMMARY_SHIFT_C: &str = "Total number of Shift C days";

/// Rendering of [`Validity::Empty`] in the report
pub const VALID_EMPTY_LABEL: &str = "True (empty)";

/// Shift category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftCategory {
    B,
    C,
}

impl fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftCategory::B => f.write_str("Shift B"),
            ShiftCategory::C => f.write_str("Shift C"),
        }
    }
}

/// Outcome of checking one category of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// Every claimed day has a matching time entry
    Valid,
    /// At least one claimed day has no matching time entry
    Invalid,
    /// Nothing claimed; valid, but distinguishable from a full match
    Empty,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        !matches!(self, Validity::Invalid)
    }

    pub fn to_cell(self) -> CellValue {
        match self {
            Validity::Valid => CellValue::Bool(true),
            Validity::Invalid => CellValue::Bool(false),
            Validity::Empty => CellValue::Text(VALID_EMPTY_LABEL.to_string()),
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validity::Valid => f.write_str("True"),
            Validity::Invalid => f.write_str("False"),
            Validity::Empty => f.write_str(VALID_EMPTY_LABEL),
        }
    }
}

/// Result for one record and one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryResult {
    pub validity: Validity,
    /// Claimed day tokens with no matching entry, in claim order
    pub missing_days: Vec<String>,
    /// Raw token count of the claim cell
    pub total_days: usize,
}

impl CategoryResult {
    /// Missing days as written to the report, e.g. `"3, 14"`
    pub fn missing_label(&self) -> String {
        self.missing_days.join(", ")
    }
}

/// Result for one shift record (one row of the claim sheet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordResult {
    /// Worksheet row number (header is row 1)
    pub row: usize,
    pub enterprise_id: String,
    pub shift_b: CategoryResult,
    pub shift_c: CategoryResult,
}

impl RecordResult {
    pub fn category(&self, category: ShiftCategory) -> &CategoryResult {
        match category {
            ShiftCategory::B => &self.shift_b,
            ShiftCategory::C => &self.shift_c,
        }
    }

    pub fn total_days(&self) -> usize {
        self.shift_b.total_days + self.shift_c.total_days
    }

    pub fn is_valid(&self) -> bool {
        self.shift_b.validity.is_valid() && self.shift_c.validity.is_valid()
    }
}

/// Aggregate figures written to the summary sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SummaryTotals {
    /// Distinct non-blank enterprise ids
    pub total_resources: usize,
    /// Row-based sum, duplicates of an id included
    pub total_shift_b_days: usize,
    pub total_shift_c_days: usize,
}

/// Run statistics for the terminal, not part of the workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportStats {
    pub records: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    pub time_entries: usize,
    pub unparseable_dates: usize,
}

/// Everything one validation run produces
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// The claim sheet as read
    pub shift_data: Sheet,
    pub records: Vec<RecordResult>,
    pub summary: SummaryTotals,
    pub stats: ReportStats,
}

impl ValidationReport {
    /// Claim sheet with the seven result columns appended
    pub fn annotated_sheet(&self, name: &str) -> Sheet {
        let mut headers = self.shift_data.headers.clone();
        headers.extend(
            [
                SHIFT_B_VALID,
                MISSING_SHIFT_B,
                SHIFT_C_VALID,
                MISSING_SHIFT_C,
                TOTAL_SHIFT_B,
                TOTAL_SHIFT_C,
                TOTAL_SHIFT,
            ]
            .map(String::from),
        );

        let mut sheet = Sheet::new(name, headers);
        for (row, record) in self.shift_data.rows.iter().zip(&self.records) {
            let mut cells = row.clone();
            cells.resize(self.shift_data.column_count(), CellValue::Empty);
            cells.extend([
                record.shift_b.validity.to_cell(),
                CellValue::Text(record.shift_b.missing_label()),
                record.shift_c.validity.to_cell(),
                CellValue::Text(record.shift_c.missing_label()),
                CellValue::Number(record.shift_b.total_days as f64),
                CellValue::Number(record.shift_c.total_days as f64),
                CellValue::Number(record.total_days() as f64),
            ]);
            sheet.push_row(cells);
        }
        sheet
    }

    /// One-row summary sheet
    pub fn summary_sheet(&self, name: &str) -> Sheet {
        let headers = [SUMMARY_RESOURCES, SUMMARY_SHIFT_B, SUMMARY_SHIFT_C]
            .map(String::from)
            .to_vec();
        let mut sheet = Sheet::new(name, headers);
        sheet.push_row(vec![
            CellValue::Number(self.summary.total_resources as f64),
            CellValue::Number(self.summary.total_shift_b_days as f64),
            CellValue::Number(self.summary.total_shift_c_days as f64),
        ]);
        sheet
    }

    /// Records with at least one invalid category
    pub fn invalid_records(&self) -> impl Iterator<Item = &RecordResult> {
        self.records.iter().filter(|r| !r.is_valid())
    }
}

/// Validates shift claims against time entries
#[derive(Debug, Clone, Default)]
pub struct ShiftValidator {
    layout: WorkbookLayout,
}

impl ShiftValidator {
    pub fn new(layout: WorkbookLayout) -> Self {
        Self { layout }
    }

    /// Validate every row of `shift_data` against `time_entries`
    ///
    /// Fails only when a configured column is absent from either sheet.
    pub fn validate(&self, shift_data: &Sheet, time_entries: &Sheet) -> ShiftResult<ValidationReport> {
        let id_idx = shift_data.column_index(&self.layout.id_column)?;
        let b_idx = shift_data.column_index(&self.layout.shift_b_column)?;
        let c_idx = shift_data.column_index(&self.layout.shift_c_column)?;

        let log = AttendanceLog::from_sheet(
            time_entries,
            &self.layout.email_column,
            &self.layout.date_column,
        )?;

        let mut records = Vec::with_capacity(shift_data.row_count());
        for row in 0..shift_data.row_count() {
            let enterprise_id = shift_data.cell(row, id_idx).to_text().trim().to_string();
            let matched = log.matched_days(&enterprise_id);

            let shift_b = check_category(shift_data.cell(row, b_idx), &matched);
            let shift_c = check_category(shift_data.cell(row, c_idx), &matched);

            debug!(
                row = row + 2,
                id = %enterprise_id,
                shift_b = %shift_b.validity,
                shift_c = %shift_c.validity,
                "checked shift record"
            );

            records.push(RecordResult {
                row: row + 2,
                enterprise_id,
                shift_b,
                shift_c,
            });
        }

        let summary = summarize(&records);
        let valid_records = records.iter().filter(|r| r.is_valid()).count();
        let stats = ReportStats {
            records: records.len(),
            valid_records,
            invalid_records: records.len() - valid_records,
            time_entries: log.len(),
            unparseable_dates: log.unparseable_dates(),
        };

        info!(
            records = stats.records,
            invalid = stats.invalid_records,
            time_entries = stats.time_entries,
            "validated shift data"
        );

        Ok(ValidationReport {
            shift_data: shift_data.clone(),
            records,
            summary,
            stats,
        })
    }
}

/// Check one claim cell against the days matched for its employee
pub fn check_category(cell: &CellValue, matched_days: &HashSet<&str>) -> CategoryResult {
    if cell.is_blank() {
        return CategoryResult {
            validity: Validity::Empty,
            missing_days: Vec::new(),
            total_days: 0,
        };
    }

    let raw = cell.to_text();
    let missing_days: Vec<String> = normalize_day_tokens(&raw)
        .into_iter()
        .filter(|day| !matched_days.contains(day.as_str()))
        .collect();

    let validity = if missing_days.is_empty() {
        Validity::Valid
    } else {
        Validity::Invalid
    };

    CategoryResult {
        validity,
        missing_days,
        total_days: count_day_tokens(&raw),
    }
}

/// Aggregate totals over all records
pub fn summarize(records: &[RecordResult]) -> SummaryTotals {
    let resources: HashSet<&str> = records
        .iter()
        .map(|r| r.enterprise_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();

    SummaryTotals {
        total_resources: resources.len(),
        total_shift_b_days: records.iter().map(|r| r.shift_b.total_days).sum(),
        total_shift_c_days: records.iter().map(|r| r.shift_c.total_days).sum(),
    }
}

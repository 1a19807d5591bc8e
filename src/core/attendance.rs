//! Attendance log: time entries with their derived day-of-month

use super::dates::entry_day;
use crate::error::ShiftResult;
use crate::types::Sheet;
use std::collections::HashSet;
use tracing::{debug, warn};

/// One attendance event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    /// Email-like identifier as written in the log
    pub identifier: String,
    /// Day-of-month, `None` when the entry date did not parse
    pub day: Option<String>,
}

impl TimeEntry {
    pub fn new(identifier: impl Into<String>, day: Option<&str>) -> Self {
        Self {
            identifier: identifier.into(),
            day: day.map(str::to_string),
        }
    }
}

/// All time entries of one run, with identifiers pre-lowered for matching
#[derive(Debug, Clone, Default)]
pub struct AttendanceLog {
    entries: Vec<TimeEntry>,
    lowered: Vec<String>,
    unparseable_dates: usize,
}

impl AttendanceLog {
    pub fn new(entries: Vec<TimeEntry>) -> Self {
        let lowered = entries
            .iter()
            .map(|entry| entry.identifier.to_lowercase())
            .collect();
        Self {
            entries,
            lowered,
            unparseable_dates: 0,
        }
    }

    /// Build the log from the time entry sheet
    ///
    /// Fails only when a named column is absent. Rows with unparseable dates
    /// are kept with no day.
    pub fn from_sheet(sheet: &Sheet, email_column: &str, date_column: &str) -> ShiftResult<Self> {
        let email_idx = sheet.column_index(email_column)?;
        let date_idx = sheet.column_index(date_column)?;

        let mut entries = Vec::with_capacity(sheet.row_count());
        let mut unparseable_dates = 0;

        for row in 0..sheet.row_count() {
            let date_cell = sheet.cell(row, date_idx);
            let day = entry_day(date_cell);
            if day.is_none() && !date_cell.is_blank() {
                unparseable_dates += 1;
                debug!(
                    sheet = %sheet.name,
                    row = row + 2,
                    value = %date_cell,
                    "unparseable time entry date"
                );
            }
            entries.push(TimeEntry {
                identifier: sheet.cell(row, email_idx).to_text(),
                day,
            });
        }

        if unparseable_dates > 0 {
            warn!(
                sheet = %sheet.name,
                count = unparseable_dates,
                "time entry dates could not be parsed; those entries match no day"
            );
        }

        let mut log = Self::new(entries);
        log.unparseable_dates = unparseable_dates;
        Ok(log)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    /// Non-empty date cells that did not parse
    pub fn unparseable_dates(&self) -> usize {
        self.unparseable_dates
    }

    /// Days of every entry whose identifier contains `identifier`,
    /// case-insensitively
    ///
    /// A blank identifier matches nothing.
    pub fn matched_days(&self, identifier: &str) -> HashSet<&str> {
        let needle = identifier.trim().to_lowercase();
        if needle.is_empty() {
            return HashSet::new();
        }
        self.entries
            .iter()
            .zip(&self.lowered)
            .filter(|(_, lowered)| lowered.contains(&needle))
            .filter_map(|(entry, _)| entry.day.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellValue;

    fn log() -> AttendanceLog {
        AttendanceLog::new(vec![
            TimeEntry::new("ABC123@x.com", Some("1")),
            TimeEntry::new("abc123@x.com", Some("2")),
            TimeEntry::new("e1234@x.com", Some("7")),
            TimeEntry::new("zed@x.com", Some("3")),
            TimeEntry::new("abc123@x.com", None),
        ])
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let log = log();
        let days = log.matched_days("abc");
        assert_eq!(days, HashSet::from(["1", "2"]));
    }

    #[test]
    fn test_prefix_identifier_matches_longer_one() {
        let log = log();
        let days = log.matched_days("E123");
        assert!(days.contains("7"));
    }

    #[test]
    fn test_blank_identifier_matches_nothing() {
        assert!(log().matched_days("").is_empty());
        assert!(log().matched_days("   ").is_empty());
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(log().matched_days("nobody").is_empty());
    }

    #[test]
    fn test_from_sheet() {
        let mut sheet = Sheet::new(
            "FG",
            vec!["Email".to_string(), "Time Entry Date".to_string()],
        );
        sheet.push_row(vec!["a@x.com".into(), "2024-03-05".into()]);
        sheet.push_row(vec!["a@x.com".into(), "garbage".into()]);
        sheet.push_row(vec!["b@x.com".into(), CellValue::Empty]);
        sheet.push_row(vec!["c@x.com".into(), CellValue::Number(45357.0)]);

        let log = AttendanceLog::from_sheet(&sheet, "Email", "Time Entry Date").unwrap();
        assert_eq!(log.len(), 4);
        assert_eq!(log.unparseable_dates(), 1);
        assert_eq!(log.entries()[0].day.as_deref(), Some("5"));
        assert_eq!(log.entries()[1].day, None);
        assert_eq!(log.entries()[2].day, None);
        assert_eq!(log.entries()[3].day.as_deref(), Some("6"));
    }

    #[test]
    fn test_from_sheet_missing_column() {
        let sheet = Sheet::new("FG", vec!["Email".to_string()]);
        assert!(AttendanceLog::from_sheet(&sheet, "Email", "Time Entry Date").is_err());
    }
}

//! Time entry date parsing
//!
//! Attendance exports carry dates as native spreadsheet dates, as serial
//! numbers, or as text in one of several common layouts. Anything that does
//! not parse yields `None` and never matches a claimed day.

use crate::types::CellValue;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};

/// Largest serial Excel accepts (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m.%d.%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Calendar date of a time entry cell
pub fn parse_entry_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Number(serial) => excel_serial_to_date(*serial),
        CellValue::Text(text) => parse_date_text(text),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

/// Day-of-month of a time entry cell, as a plain string (`"5"`, not `"05"`)
pub fn entry_day(cell: &CellValue) -> Option<String> {
    parse_entry_date(cell).map(|date| date.day().to_string())
}

/// Convert an Excel 1900-system serial to a date (time fraction ignored)
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let days = serial.floor() as i64;
    // Serial 60 is Excel's phantom 1900-02-29; earlier serials count from 1899-12-31
    let epoch = match days {
        60 => return None,
        1..=59 => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        _ => NaiveDate::from_ymd_opt(1899, 12, 30)?,
    };
    epoch.checked_add_signed(Duration::days(days))
}

/// Convert a date-time to an Excel 1900-system serial (inverse of
/// [`excel_serial_to_date`] for dates after 1900-03-01)
pub fn datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    (*dt - epoch).num_seconds() as f64 / 86_400.0
}

/// Parse a text date in any of the accepted layouts
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.date());
        }
    }

    if let Some(date) = parse_slash_month_first(text) {
        return Some(date);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// `MM/DD/YYYY` or `MM/DD/YY`; the year width picks the format
fn parse_slash_month_first(text: &str) -> Option<NaiveDate> {
    let year_part = text.rsplit('/').next()?;
    if text.matches('/').count() != 2 {
        return None;
    }
    // A four-digit leading segment means year-first, handled elsewhere
    if text.split('/').next().is_some_and(|first| first.len() == 4) {
        return None;
    }
    let fmt = match year_part.len() {
        2 => "%m/%d/%y",
        4 => "%m/%d/%Y",
        _ => return None,
    };
    NaiveDate::parse_from_str(text, fmt).ok()
}

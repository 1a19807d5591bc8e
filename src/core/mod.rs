//! Validation core: day tokens, time entry dates, and the shift validator

pub mod attendance;
pub mod dates;
pub mod tokens;
pub mod validator;

pub use attendance::{AttendanceLog, TimeEntry};
pub use validator::{
    CategoryResult, RecordResult, ReportStats, ShiftCategory, ShiftValidator, SummaryTotals,
    ValidationReport, Validity,
};

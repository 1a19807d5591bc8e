//! Shift Checker - validates claimed shift days against an attendance log
//!
//! An input workbook carries two sheets: the per-employee shift claims
//! (`Shift_Data`) and the raw attendance log (`FG`). Every Shift B / Shift C
//! day an employee claims must show up as the day-of-month of one of their
//! time entries. The checker annotates each claim row with its validity and
//! missing days, adds per-row totals, and writes a one-row summary sheet.
//!
//! # Features
//!
//! - Pure validation core, independent of any file format
//! - Excel import (`.xlsx`, `.xlsm`, `.xls`, `.ods`) and `.xlsx` export
//! - Configurable sheet and column names via a YAML layout file
//!
//! # Example
//!
//! ```no_run
//! use shift_checker::config::WorkbookLayout;
//! use shift_checker::pipeline::process_file;
//! use std::path::Path;
//!
//! let layout = WorkbookLayout::default();
//! let report = process_file(Path::new("shifts.xlsx"), Path::new("report.xlsx"), &layout)?;
//!
//! println!("Resources: {}", report.summary.total_resources);
//! println!("Shift B days: {}", report.summary.total_shift_b_days);
//! # Ok::<(), shift_checker::error::ShiftError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod pipeline;
pub mod types;

// Re-export commonly used types
pub use config::WorkbookLayout;
pub use core::{ShiftValidator, ValidationReport};
pub use error::{ShiftError, ShiftResult};
pub use types::{CellValue, Sheet};

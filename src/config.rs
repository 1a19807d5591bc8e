//! Workbook layout configuration
//!
//! Names of the sheets and columns the reader looks for. The defaults match
//! the standard shift allowance workbook; a YAML file may override any subset:
//!
//! ```yaml
//! time_sheet: Attendance
//! email_column: Login
//! ```

use crate::error::{ShiftError, ShiftResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SHIFT_SHEET: &str = "Shift_Data";
pub const DEFAULT_TIME_SHEET: &str = "FG";
pub const DEFAULT_ID_COLUMN: &str = "Enterprise id";
pub const DEFAULT_SHIFT_B_COLUMN: &str = "Shift B dates";
pub const DEFAULT_SHIFT_C_COLUMN: &str = "Shift C dates";
pub const DEFAULT_EMAIL_COLUMN: &str = "Email";
pub const DEFAULT_DATE_COLUMN: &str = "Time Entry Date";

/// Sheet and column names of an input workbook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkbookLayout {
    pub shift_sheet: String,
    pub time_sheet: String,
    pub id_column: String,
    pub shift_b_column: String,
    pub shift_c_column: String,
    pub email_column: String,
    pub date_column: String,
}

impl Default for WorkbookLayout {
    fn default() -> Self {
        Self {
            shift_sheet: DEFAULT_SHIFT_SHEET.to_string(),
            time_sheet: DEFAULT_TIME_SHEET.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            shift_b_column: DEFAULT_SHIFT_B_COLUMN.to_string(),
            shift_c_column: DEFAULT_SHIFT_C_COLUMN.to_string(),
            email_column: DEFAULT_EMAIL_COLUMN.to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
        }
    }
}

impl WorkbookLayout {
    /// Parse a layout from YAML text; missing keys keep their defaults
    pub fn from_yaml_str(content: &str) -> ShiftResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let layout: WorkbookLayout = serde_yaml::from_str(content)?;
        layout.check()?;
        Ok(layout)
    }

    /// Load a layout file
    pub fn load(path: &Path) -> ShiftResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ShiftError::Config(format!("Cannot read layout file {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&content).map_err(|e| match e {
            ShiftError::Yaml(inner) => {
                ShiftError::Config(format!("Invalid layout file {}: {}", path.display(), inner))
            }
            other => other,
        })
    }

    /// Load `path` when given, otherwise fall back to the defaults
    pub fn load_or_default(path: Option<&Path>) -> ShiftResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> ShiftResult<()> {
        let fields = [
            ("shift_sheet", &self.shift_sheet),
            ("time_sheet", &self.time_sheet),
            ("id_column", &self.id_column),
            ("shift_b_column", &self.shift_b_column),
            ("shift_c_column", &self.shift_c_column),
            ("email_column", &self.email_column),
            ("date_column", &self.date_column),
        ];
        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(ShiftError::Config(format!("'{}' must not be blank", key)));
            }
        }
        Ok(())
    }
}

//! Read → validate → write
//!
//! Each run is all or nothing: the output workbook is only written after the
//! input was read and validated in full.

use crate::config::WorkbookLayout;
use crate::core::{ShiftValidator, ValidationReport};
use crate::error::{ShiftError, ShiftResult};
use crate::excel::{is_supported_input, ExcelExporter, ExcelImporter, SUPPORTED_EXTENSIONS};
use std::path::{Path, PathBuf};
use tracing::info;

/// Extension given to output paths that have none
pub const DEFAULT_OUTPUT_EXTENSION: &str = "xlsx";

/// Validate `input` and write the annotated report to `output`
pub fn process_file(
    input: &Path,
    output: &Path,
    layout: &WorkbookLayout,
) -> ShiftResult<ValidationReport> {
    if input == output {
        return Err(ShiftError::InvalidInput(
            "Output file must differ from the input file".to_string(),
        ));
    }

    let report = inspect_file(input, layout)?;
    ExcelExporter::new(&report).export(output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "processing complete"
    );
    Ok(report)
}

/// Validate `input` without writing anything
pub fn inspect_file(input: &Path, layout: &WorkbookLayout) -> ShiftResult<ValidationReport> {
    check_input_path(input)?;

    let workbook = ExcelImporter::new(input).import(layout)?;
    ShiftValidator::new(layout.clone()).validate(&workbook.shift_data, &workbook.time_entries)
}

/// Reject inputs that are missing or not a spreadsheet before opening them
pub fn check_input_path(input: &Path) -> ShiftResult<()> {
    if !is_supported_input(input) {
        return Err(ShiftError::InvalidInput(format!(
            "{} is not an Excel file (expected one of: {})",
            input.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    if !input.is_file() {
        return Err(ShiftError::InvalidInput(format!(
            "Input file not found: {}",
            input.display()
        )));
    }
    Ok(())
}

/// Output path with the default extension added when it has none
pub fn resolve_output_path(output: &Path) -> PathBuf {
    if output.extension().is_some() {
        output.to_path_buf()
    } else {
        output.with_extension(DEFAULT_OUTPUT_EXTENSION)
    }
}

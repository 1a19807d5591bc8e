use crate::config::WorkbookLayout;
use crate::core::{
    RecordResult, ReportStats, ShiftCategory, SummaryTotals, ValidationReport, Validity,
};
use crate::error::{ShiftError, ShiftResult};
use crate::excel::{SHIFT_DATA_SHEET, SUMMARY_SHEET};
use crate::pipeline::{self, resolve_output_path};
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// JSON document printed with `--json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a SummaryTotals,
    stats: &'a ReportStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [RecordResult]>,
}

/// Execute the check command
pub fn check(
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
    json: bool,
) -> ShiftResult<()> {
    let layout = WorkbookLayout::load_or_default(config.as_deref())?;
    let output = resolve_output_path(&output);

    if json {
        let report = pipeline::process_file(&input, &output, &layout)?;
        return print_json(&report, Some(&output), false);
    }

    println!("{}", "📋 Shift Checker - Validating shift days".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        print_layout(&layout);
    }

    let report = pipeline::process_file(&input, &output, &layout)?;

    if verbose {
        print_invalid_records(&report);
    }

    print_summary(&report);

    println!("{}", "✅ Report written".bold().green());
    println!("   Excel file: {}", output.display());
    println!(
        "   Sheets: {}, {}\n",
        SHIFT_DATA_SHEET.bright_blue(),
        SUMMARY_SHEET.bright_blue()
    );

    Ok(())
}

/// Execute the inspect command - validate and print without writing
pub fn inspect(input: PathBuf, config: Option<PathBuf>, verbose: bool, json: bool) -> ShiftResult<()> {
    let layout = WorkbookLayout::load_or_default(config.as_deref())?;

    if json {
        let report = pipeline::inspect_file(&input, &layout)?;
        return print_json(&report, None, true);
    }

    println!("{}", "🔍 Shift Checker - Inspect".bold().green());
    println!("   Input: {}\n", input.display());

    if verbose {
        print_layout(&layout);
    }

    let report = pipeline::inspect_file(&input, &layout)?;

    print_records(&report, verbose);
    print_summary(&report);

    if report.stats.invalid_records == 0 {
        println!("{}", "✅ All claimed shift days have time entries".bold().green());
    } else {
        println!(
            "{}",
            format!(
                "⚠️  {} of {} records have shift days without time entries",
                report.stats.invalid_records, report.stats.records
            )
            .bold()
            .yellow()
        );
    }
    println!();

    Ok(())
}

/// Execute the watch command
pub fn watch(
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
) -> ShiftResult<()> {
    let output = resolve_output_path(&output);

    println!("{}", "👁️  Shift Checker - Watch Mode".bold().green());
    println!("   Watching: {}", input.display());
    println!("   Output:   {}", output.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    pipeline::check_input_path(&input)?;

    let canonical_path = input.canonicalize()?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| ShiftError::InvalidInput("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    // Debounce so a single save triggers a single run
    let mut debouncer = new_debouncer(Duration::from_millis(300), tx)
        .map_err(|e| ShiftError::InvalidInput(format!("Failed to create file watcher: {}", e)))?;

    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ShiftError::InvalidInput(format!("Failed to watch directory: {}", e)))?;

    if verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&input, &output, config.as_deref(), verbose);
    println!();

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events.iter().any(|event| {
                    event.kind == DebouncedEventKind::Any
                        && is_same_file(&event.path, &canonical_path)
                });

                if relevant {
                    println!(
                        "\n{} {}",
                        "🔄 Change detected at".cyan(),
                        chrono::Local::now().format("%H:%M:%S").to_string().cyan()
                    );
                    run_watch_action(&input, &output, config.as_deref(), verbose);
                    println!();
                }
            }
            Ok(Err(error)) => {
                eprintln!("{} Watch error: {}", "❌".red(), error);
            }
            Err(e) => {
                eprintln!("{} Channel error: {}", "❌".red(), e);
                break;
            }
        }
    }

    Ok(())
}

/// True when `event_path` refers to the watched input file
fn is_same_file(event_path: &Path, watched: &Path) -> bool {
    if let Ok(canonical) = event_path.canonicalize() {
        if canonical == watched {
            return true;
        }
    }
    // Saves that replace the file may report a path that no longer resolves
    event_path.file_name().is_some() && event_path.file_name() == watched.file_name()
}

/// One watch iteration; errors are reported and watching continues
fn run_watch_action(input: &Path, output: &Path, config: Option<&Path>, verbose: bool) {
    let result = WorkbookLayout::load_or_default(config)
        .and_then(|layout| pipeline::process_file(input, output, &layout));

    match result {
        Ok(report) => {
            if verbose {
                print_invalid_records(&report);
            }
            print_summary(&report);
            println!(
                "{} {}",
                "✅ Report written to".bold().green(),
                output.display()
            );
        }
        Err(e) => println!("{} {}", "❌ Processing failed:".bold().red(), e),
    }
}

fn print_json(report: &ValidationReport, output: Option<&Path>, with_records: bool) -> ShiftResult<()> {
    let doc = JsonReport {
        summary: &report.summary,
        stats: &report.stats,
        output: output.map(|p| p.display().to_string()),
        records: with_records.then_some(report.records.as_slice()),
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn print_layout(layout: &WorkbookLayout) {
    println!("{}", "📖 Workbook layout:".cyan());
    println!(
        "   {} → {}, {}, {}",
        layout.shift_sheet.bright_blue(),
        layout.id_column,
        layout.shift_b_column,
        layout.shift_c_column
    );
    println!(
        "   {} → {}, {}\n",
        layout.time_sheet.bright_blue(),
        layout.email_column,
        layout.date_column
    );
}

fn print_summary(report: &ValidationReport) {
    let summary = &report.summary;
    let stats = &report.stats;

    println!("{}", "📊 Summary:".bold().cyan());
    println!(
        "   Total number of resources:    {}",
        summary.total_resources.to_string().bold()
    );
    println!(
        "   Total number of Shift B days: {}",
        summary.total_shift_b_days.to_string().bold()
    );
    println!(
        "   Total number of Shift C days: {}",
        summary.total_shift_c_days.to_string().bold()
    );
    println!(
        "   Records: {} valid, {} with missing days ({} time entries read)",
        stats.valid_records.to_string().green(),
        stats.invalid_records.to_string().red(),
        stats.time_entries
    );
    if stats.unparseable_dates > 0 {
        println!(
            "   {} {} time entry dates could not be parsed and were ignored",
            "⚠️ ".yellow(),
            stats.unparseable_dates
        );
    }
    println!();
}

fn print_invalid_records(report: &ValidationReport) {
    let invalid: Vec<&RecordResult> = report.invalid_records().collect();
    if invalid.is_empty() {
        return;
    }
    println!("{}", "❌ Records with missing days:".bold().red());
    for record in invalid {
        print_record(record);
    }
    println!();
}

fn print_records(report: &ValidationReport, all: bool) {
    println!("{}", "📋 Records:".bold().cyan());
    let mut shown = 0;
    for record in &report.records {
        if all || !record.is_valid() {
            print_record(record);
            shown += 1;
        }
    }
    if shown == 0 {
        println!("   (no records with missing days; use --verbose to list all)");
    }
    println!();
}

fn print_record(record: &RecordResult) {
    let id = if record.enterprise_id.is_empty() {
        "(blank id)".to_string()
    } else {
        record.enterprise_id.clone()
    };
    let categories: Vec<String> = [ShiftCategory::B, ShiftCategory::C]
        .into_iter()
        .map(|category| {
            let result = record.category(category);
            format!(
                "{}: {}",
                category,
                format_category(result.validity, &result.missing_days)
            )
        })
        .collect();
    println!(
        "   row {:>4}  {}  {}  ({} days)",
        record.row,
        id.bright_blue(),
        categories.join("  "),
        record.total_days()
    );
}

/// One category cell of the terminal listing
fn format_category(validity: Validity, missing: &[String]) -> String {
    match validity {
        Validity::Valid => "ok".green().to_string(),
        Validity::Empty => "-".dimmed().to_string(),
        Validity::Invalid => format!("missing {}", missing.join(",")).red().to_string(),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

use clap::{Parser, Subcommand};
use shift_checker::cli;
use shift_checker::error::ShiftResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shift-checker")]
#[command(about = "Check claimed Shift B/C days against the attendance log.")]
#[command(long_about = "Shift Checker - shift allowance validation

Reads an Excel workbook with two sheets:
  Shift_Data  - one row per employee: 'Enterprise id', 'Shift B dates', 'Shift C dates'
  FG          - attendance log: 'Email', 'Time Entry Date'

Every day listed in 'Shift B dates' / 'Shift C dates' (comma or period
separated, e.g. 01,02.15) must match the day-of-month of a time entry whose
Email contains the Enterprise id (case-insensitive).

COMMANDS:
  check    - Validate and write the annotated report workbook
  inspect  - Validate and print results, write nothing
  watch    - Re-run check whenever the input workbook is saved

EXAMPLES:
  shift-checker check shifts.xlsx report.xlsx
  shift-checker inspect shifts.xlsx --verbose
  shift-checker check shifts.xlsx report --config layout.yaml --json

Set RUST_LOG=shift_checker=debug for per-row diagnostics.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Validate shift days and write the report workbook.

The report has two sheets:
  Shift Data - the input rows plus Shift B Valid, Missing Shift B Dates,
               Shift C Valid, Missing Shift C Dates, Total Shift B Days,
               Total Shift C Days, Total Shift Days
  Summary    - Total number of resources, Total number of Shift B days,
               Total number of Shift C days

A blank day list is reported as 'True (empty)'.
Nothing is written if the input is missing a sheet or column.

EXAMPLE:
  shift-checker check shifts.xlsx report.xlsx")]
    /// Validate shift days and write the report workbook
    Check {
        /// Input Excel workbook (.xlsx, .xlsm, .xls, .xlsb, .ods)
        input: PathBuf,

        /// Output report path (.xlsx is added when no extension is given)
        output: PathBuf,

        /// YAML file overriding sheet and column names
        #[arg(short, long, env = "SHIFT_CHECKER_LAYOUT")]
        config: Option<PathBuf>,

        /// List records with missing days
        #[arg(short, long)]
        verbose: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate shift days and print results without writing a report
    Inspect {
        /// Input Excel workbook (.xlsx, .xlsm, .xls, .xlsb, .ods)
        input: PathBuf,

        /// YAML file overriding sheet and column names
        #[arg(short, long, env = "SHIFT_CHECKER_LAYOUT")]
        config: Option<PathBuf>,

        /// List every record, not only those with missing days
        #[arg(short, long)]
        verbose: bool,

        /// Print summary and per-record results as JSON
        #[arg(long)]
        json: bool,
    },

    #[command(long_about = "Watch the input workbook and re-run check on every save.

Errors are reported and watching continues, so a half-edited workbook
does not stop the watcher.

Press Ctrl+C to stop watching.")]
    /// Re-run check whenever the input workbook changes
    Watch {
        /// Input Excel workbook to watch
        input: PathBuf,

        /// Output report path
        output: PathBuf,

        /// YAML file overriding sheet and column names
        #[arg(short, long, env = "SHIFT_CHECKER_LAYOUT")]
        config: Option<PathBuf>,

        /// List records with missing days after each run
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Check { verbose, .. }
            | Commands::Inspect { verbose, .. }
            | Commands::Watch { verbose, .. } => *verbose,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "shift_checker=info"
    } else {
        "shift_checker=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ShiftResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Check {
            input,
            output,
            config,
            verbose,
            json,
        } => cli::check(input, output, config, verbose, json),

        Commands::Inspect {
            input,
            config,
            verbose,
            json,
        } => cli::inspect(input, config, verbose, json),

        Commands::Watch {
            input,
            output,
            config,
            verbose,
        } => cli::watch(input, output, config, verbose),
    }
}

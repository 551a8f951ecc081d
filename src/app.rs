//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and normalizes the spreadsheet
//! - prints reports/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, MonthlyArgs, TableArgs, TrendArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ccl` binary.
pub fn run() -> Result<(), AppError> {
    // We want `ccl data.xlsx` to behave like `ccl tui data.xlsx`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Trend(args) => handle_trend(args),
        Command::Monthly(args) => handle_monthly(args),
        Command::Table(args) => handle_table(args),
    }
}

fn handle_trend(args: TrendArgs) -> Result<(), AppError> {
    let run = pipeline::run_load(&args.load.file)?;

    println!("{}", crate::report::format_trend_summary(&run.weekly));

    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_trend_plot(&run.weekly, args.width, args.height)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export::write_series_csv(path, &run.weekly)?;
    }

    Ok(())
}

fn handle_monthly(args: MonthlyArgs) -> Result<(), AppError> {
    let run = pipeline::run_load(&args.load.file)?;

    println!("{}", crate::report::format_monthly_table(&run.monthly));

    if let Some(path) = &args.export {
        crate::io::export::write_monthly_json(path, &run.monthly)?;
    }

    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let run = pipeline::run_load(&args.load.file)?;
    println!("{}", crate::report::format_series_table(&run.series, args.last));
    Ok(())
}

/// Rewrite argv so `ccl FILE` defaults to `ccl tui FILE`.
///
/// Rules:
/// - `ccl data.xlsx ...`       -> `ccl tui data.xlsx ...`
/// - `ccl --help/--version/-h` -> unchanged (show top-level help/version)
/// - explicit subcommands      -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "trend" | "monthly" | "table");
    if is_subcommand {
        return argv;
    }

    // Anything else (a file path, or flags meant for the viewer) is treated
    // as "tui arguments".
    argv.insert(1, "tui".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("ccl")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn bare_file_path_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["data.xlsx"])), argv(&["tui", "data.xlsx"]));
    }

    #[test]
    fn explicit_subcommands_are_untouched() {
        assert_eq!(rewrite_args(argv(&["trend", "data.xlsx"])), argv(&["trend", "data.xlsx"]));
        assert_eq!(rewrite_args(argv(&["table", "data.csv", "-n", "5"])), argv(&["table", "data.csv", "-n", "5"]));
    }

    #[test]
    fn help_and_version_are_untouched() {
        assert_eq!(rewrite_args(argv(&["--help"])), argv(&["--help"]));
        assert_eq!(rewrite_args(argv(&["-V"])), argv(&["-V"]));
        assert_eq!(rewrite_args(argv(&[])), argv(&[]));
    }
}

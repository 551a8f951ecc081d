//! Command-line parsing for the CCL trend viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline/series code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ccl", version, about = "Weekly CCL index trends: normalize a spreadsheet, chart the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive viewer (trend, monthly candles, table tabs).
    ///
    /// This is the default: `ccl data.xlsx` behaves like `ccl tui data.xlsx`.
    Tui(LoadArgs),
    /// Print the weekly trend summary and an ASCII chart with MA bands.
    Trend(TrendArgs),
    /// Print the monthly OHLC aggregation with its 10-month MA.
    Monthly(MonthlyArgs),
    /// Print the latest records as a table.
    Table(TableArgs),
}

/// Input file options shared by every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct LoadArgs {
    /// Spreadsheet to load (.xlsx, .xlsm, .xls, or .csv; first sheet only).
    pub file: PathBuf,
}

/// Options for the weekly trend view.
#[derive(Debug, Parser)]
pub struct TrendArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Skip the ASCII chart and print the summary only.
    #[arg(long)]
    pub no_plot: bool,

    /// Export the weekly series (with band columns) to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for the monthly aggregation view.
#[derive(Debug, Parser)]
pub struct MonthlyArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Export the monthly aggregation to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for the table view.
#[derive(Debug, Parser)]
pub struct TableArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Number of latest records to show.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub last: usize,
}

//! Shared load pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! read grid -> ingest/validate/sort -> weekly bands -> monthly aggregation
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use std::path::Path;

use crate::domain::{MonthPeriod, Record, WeeklyPoint};
use crate::error::UploadError;
use crate::series::{to_monthly, with_weekly_bands};

/// All computed outputs of a single file load.
///
/// This is the sole artifact handed to renderers; nothing here feeds back
/// into the pipeline.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The validated series, sorted ascending by end date.
    pub series: Vec<Record>,
    /// One point per record, annotated with the 52-week MA band.
    pub weekly: Vec<WeeklyPoint>,
    /// Calendar-month OHLC aggregation with the 10-month MA.
    pub monthly: Vec<MonthPeriod>,
}

/// Load a file and run the full pipeline.
///
/// Either a complete, valid `RunOutput` is produced or a typed error; there
/// is no partial result and no retry.
pub fn run_load(path: &Path) -> Result<RunOutput, UploadError> {
    let grid = crate::io::workbook::read_grid(path)?;
    let series = crate::io::ingest::ingest(&grid)?;

    let weekly = with_weekly_bands(&series);
    let monthly = to_monthly(&series);

    Ok(RunOutput {
        series,
        weekly,
        monthly,
    })
}

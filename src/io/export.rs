//! Exports: weekly series CSV and monthly aggregation JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON mirrors what the candlestick renderer consumes.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::{MonthPeriod, WeeklyPoint};
use crate::error::AppError;

/// Write the weekly series (with band columns) to a CSV file.
pub fn write_series_csv(path: &Path, weekly: &[WeeklyPoint]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(file, "end_date,ccl,ma52,upper_band,lower_band,date_range")
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for p in weekly {
        writeln!(
            file,
            "{},{:.4},{:.4},{:.4},{:.4},\"{}\"",
            p.record.end_date,
            p.record.value,
            p.ma52,
            p.upper_band,
            p.lower_band,
            p.record.original_range.replace('"', "\"\""),
        )
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// A saved monthly-aggregation file (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyFile {
    pub tool: String,
    pub months: Vec<MonthPeriod>,
}

/// Write the monthly OHLC aggregation to a JSON file.
pub fn write_monthly_json(path: &Path, monthly: &[MonthPeriod]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create monthly JSON '{}': {e}", path.display())))?;

    let contents = MonthlyFile {
        tool: "ccl".to_string(),
        months: monthly.to_vec(),
    };

    serde_json::to_writer_pretty(file, &contents)
        .map_err(|e| AppError::new(4, format!("Failed to write monthly JSON: {e}")))?;

    Ok(())
}

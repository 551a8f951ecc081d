//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw spreadsheet cells as delivered by the workbook readers (`Cell`)
//! - normalized weekly index records (`Record`)
//! - derived analytic points (`WeeklyPoint`, `MonthPeriod`)

pub mod types;

pub use types::*;

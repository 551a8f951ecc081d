//! Input/output helpers.
//!
//! - workbook/CSV grid readers (`workbook`)
//! - grid -> sorted series normalization (`ingest`)
//! - series/monthly exports (`export`)

pub mod export;
pub mod ingest;
pub mod workbook;

pub use export::*;
pub use ingest::*;
pub use workbook::*;

//! Reporting utilities: formatted terminal tables and summaries.
//!
//! We keep formatting code in one place so:
//! - the pipeline and series code stay clean and testable
//! - output changes are localized (important for future snapshot tests)

pub mod format;

pub use format::*;

//! Derived-series engine: rolling statistics over the sorted series.
//!
//! Both transformations are one-shot, stateless, and total over any sorted
//! series (including the empty one):
//!
//! - weekly trend with trailing 52-week moving-average bands (`weekly`)
//! - monthly OHLC aggregation with a trailing 10-month average (`monthly`)

pub mod monthly;
pub mod rolling;
pub mod weekly;

pub use monthly::*;
pub use rolling::*;
pub use weekly::*;

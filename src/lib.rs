//! Historical grade distributions and side-by-side comparisons.
//!
//! [`analyzers`] is the engine: selection filtering, grade aggregation and
//! comparison merging, all pure functions over caller-owned data. The other
//! modules load offering records, configure comparisons and export results.

pub mod analyzers;
pub mod config;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod records;

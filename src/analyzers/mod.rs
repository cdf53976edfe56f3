//! Grade aggregation engine.
//!
//! Filters offering records by selection, sums and normalizes their grade
//! counts, and merges several aggregations into one chart table. Everything
//! here is synchronous and free of I/O.

pub mod aggregate;
pub mod compare;
pub mod filter;
pub mod grade;
pub mod snapshots;
pub mod types;
pub mod utility;

//! Output formatting and persistence for distributions and comparison tables.
//!
//! Supports pretty-printing, JSON serialization, and CSV export.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::{AggregatedDistribution, ComparisonRow, ComparisonSnapshot};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;

/// Logs a distribution using Rust's debug pretty-print format.
pub fn print_pretty(distribution: &AggregatedDistribution) {
    debug!("{:#?}", distribution);
}

/// Logs any serializable engine output as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a merged comparison table to a CSV file, replacing it if present.
///
/// The header is `grade` followed by each snapshot's label; each row is one
/// grade bucket.
pub fn write_comparison_csv(
    path: &str,
    snapshots: &[ComparisonSnapshot],
    rows: &[ComparisonRow],
) -> Result<()> {
    debug!(path, snapshots = snapshots.len(), rows = rows.len(), "Writing comparison CSV");

    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header = vec!["grade".to_string()];
    header.extend(snapshots.iter().map(|s| s.label.clone()));
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.grade.to_string()];
        record.extend(
            snapshots
                .iter()
                .map(|s| format!("{:.1}", row.get(&s.id).unwrap_or(0.0))),
        );
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

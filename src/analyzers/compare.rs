use crate::analyzers::grade::GradeBucketKey;
use crate::analyzers::types::{ComparisonRow, ComparisonSnapshot};

/// Builds the chart table for a comparison set: one row per grade bucket in
/// display order, one column per snapshot in snapshot order.
///
/// Each column keeps its own snapshot's percentages. Snapshots are not
/// normalized against one another, so a 30-student section and a
/// 300-student section compare by shape.
pub fn merge(snapshots: &[ComparisonSnapshot]) -> Vec<ComparisonRow> {
    GradeBucketKey::ALL
        .iter()
        .map(|key| ComparisonRow {
            grade: *key,
            columns: snapshots
                .iter()
                .map(|s| (s.id.clone(), s.distribution.percentage(*key)))
                .collect(),
        })
        .collect()
}

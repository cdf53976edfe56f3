//! Data types produced by the aggregation pipeline.

use crate::analyzers::grade::GradeBucketKey;
use crate::records::{AxisFilter, RatingSnapshot};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summed and normalized grade counts for a set of offerings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDistribution {
    /// Student count per bucket; all 16 buckets are present.
    pub counts: BTreeMap<GradeBucketKey, u64>,
    /// Share of `total_count` per bucket, rounded to a tenth of a percent.
    pub percentages: BTreeMap<GradeBucketKey, f64>,
    pub total_count: u64,
    /// Students in letter-graded buckets (excludes P, NP and W).
    pub numeric_count: u64,
    pub average_gpa: f64,
    /// Letter the average GPA rounds down to; `None` without letter grades.
    pub letter_grade: Option<GradeBucketKey>,
}

impl AggregatedDistribution {
    pub fn count(&self, key: GradeBucketKey) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn percentage(&self, key: GradeBucketKey) -> f64 {
        self.percentages.get(&key).copied().unwrap_or(0.0)
    }
}

/// A selectable value for one axis of a selection, as shown in a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: String,
    pub value: AxisFilter,
}

impl FilterOption {
    pub(crate) fn any(label: &str) -> Self {
        FilterOption {
            label: label.to_string(),
            value: AxisFilter::Any,
        }
    }

    pub(crate) fn only(value: &str) -> Self {
        FilterOption {
            label: value.to_string(),
            value: AxisFilter::Only(value.to_string()),
        }
    }
}

/// A snapshot before it joins the comparison set and receives a color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDraft {
    pub id: String,
    pub label: String,
    pub instructor: Option<String>,
    pub term: Option<String>,
    pub distribution: AggregatedDistribution,
    pub rating: Option<RatingSnapshot>,
}

/// An aggregation the user chose to keep visible for side-by-side comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSnapshot {
    pub id: String,
    pub label: String,
    pub instructor: Option<String>,
    pub term: Option<String>,
    pub distribution: AggregatedDistribution,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingSnapshot>,
}

/// Result of trying to add a snapshot to a bounded comparison set.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added(Vec<ComparisonSnapshot>),
    /// The set was already full; carries the unchanged collection.
    AtCapacity(Vec<ComparisonSnapshot>),
    /// A snapshot with the same id is already in the set; carries the
    /// unchanged collection.
    DuplicateId(Vec<ComparisonSnapshot>),
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    /// The resulting collection, whichever way the add went.
    pub fn into_snapshots(self) -> Vec<ComparisonSnapshot> {
        match self {
            AddOutcome::Added(snapshots)
            | AddOutcome::AtCapacity(snapshots)
            | AddOutcome::DuplicateId(snapshots) => snapshots,
        }
    }
}

/// One grade bucket of the merged comparison table.
///
/// Serializes flat, as `{"grade": "A", "<snapshot id>": 50.0, ...}`, with
/// columns in snapshot order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub grade: GradeBucketKey,
    pub columns: Vec<(String, f64)>,
}

impl ComparisonRow {
    /// Value of the column for `snapshot_id`, if that snapshot is in the row.
    pub fn get(&self, snapshot_id: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(id, _)| id == snapshot_id)
            .map(|(_, value)| *value)
    }

    /// Keeps only the letter-grade rows, for charts that hide P, NP and W.
    pub fn letters_only(rows: &[ComparisonRow]) -> Vec<ComparisonRow> {
        rows.iter()
            .filter(|row| row.grade.points().is_some())
            .cloned()
            .collect()
    }
}

impl Serialize for ComparisonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len() + 1))?;
        map.serialize_entry("grade", &self.grade)?;
        for (id, value) in &self.columns {
            map.serialize_entry(id, value)?;
        }
        map.end()
    }
}

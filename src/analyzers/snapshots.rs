//! Transitions of the caller-owned comparison set.
//!
//! Every function takes the current collection by reference and hands back a
//! new one; the caller keeps whichever version it renders.

use crate::analyzers::types::{
    AddOutcome, AggregatedDistribution, ComparisonSnapshot, SnapshotDraft,
};
use crate::records::{RatingSnapshot, Selection};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Series colors handed out to snapshots in order.
pub const DEFAULT_PALETTE: [&str; 4] = ["#8884d8", "#82ca9d", "#ffc658", "#ff7300"];

impl SnapshotDraft {
    /// Describes `selection` as a snapshot that can be added to a comparison.
    pub fn from_selection(
        id: String,
        selection: &Selection,
        distribution: AggregatedDistribution,
        rating: Option<RatingSnapshot>,
    ) -> Self {
        SnapshotDraft {
            id,
            label: selection.label(),
            instructor: selection.instructor.as_option().map(str::to_string),
            term: selection.term.as_option().map(str::to_string),
            distribution,
            rating,
        }
    }
}

/// Appends `draft` when `current` holds fewer than `max` snapshots.
///
/// The new snapshot takes the first palette color nobody in `current` uses.
/// A full set comes back unchanged as [`AddOutcome::AtCapacity`], and a
/// draft whose id is already taken as [`AddOutcome::DuplicateId`].
pub fn add_snapshot(
    current: &[ComparisonSnapshot],
    draft: SnapshotDraft,
    max: usize,
    palette: &[String],
) -> AddOutcome {
    if current.len() >= max {
        debug!(max, id = %draft.id, "Comparison set full, snapshot not added");
        return AddOutcome::AtCapacity(current.to_vec());
    }

    if current.iter().any(|s| s.id == draft.id) {
        debug!(id = %draft.id, "Snapshot id already in comparison set, not added");
        return AddOutcome::DuplicateId(current.to_vec());
    }

    let color = next_color(current, palette);
    debug!(id = %draft.id, color = %color, "Adding snapshot to comparison set");

    let mut next = current.to_vec();
    next.push(ComparisonSnapshot {
        id: draft.id,
        label: draft.label,
        instructor: draft.instructor,
        term: draft.term,
        distribution: draft.distribution,
        color,
        rating: draft.rating,
    });
    AddOutcome::Added(next)
}

/// Drops the snapshot with `id`. An unknown id leaves the set as it was.
pub fn remove_snapshot(current: &[ComparisonSnapshot], id: &str) -> Vec<ComparisonSnapshot> {
    current.iter().filter(|s| s.id != id).cloned().collect()
}

/// First color of `palette` not used by `current`, reusing the first one
/// once every color is taken. An empty palette falls back to
/// [`DEFAULT_PALETTE`].
pub fn next_color(current: &[ComparisonSnapshot], palette: &[String]) -> String {
    let palette: Vec<&str> = if palette.is_empty() {
        DEFAULT_PALETTE.to_vec()
    } else {
        palette.iter().map(String::as_str).collect()
    };

    palette
        .iter()
        .find(|color| !current.iter().any(|s| s.color == **color))
        .unwrap_or(&palette[0])
        .to_string()
}

/// Id for a snapshot created at `now`: its millisecond timestamp, bumped
/// until no snapshot in `current` already uses it.
pub fn next_snapshot_id(current: &[ComparisonSnapshot], now: DateTime<Utc>) -> String {
    let mut millis = now.timestamp_millis();
    while current.iter().any(|s| s.id == millis.to_string()) {
        millis += 1;
    }
    millis.to_string()
}

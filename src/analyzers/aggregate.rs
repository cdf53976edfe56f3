use crate::analyzers::grade::{GradeBucketKey, letter_for_gpa};
use crate::analyzers::types::AggregatedDistribution;
use crate::analyzers::utility::{percent_tenths, weighted_mean};
use crate::records::OfferingRecord;
use std::collections::BTreeMap;

/// Sums the grade counts of `filtered` into a single [`AggregatedDistribution`].
///
/// Percentages are each bucket's share of all students (P, NP and W
/// included), rounded to a tenth of a percent. The average GPA only weighs
/// letter-graded students. Symbols that are not a known bucket are skipped,
/// and an empty input yields an all-zero distribution. Counts saturate at
/// `u64::MAX` instead of overflowing.
pub fn aggregate(filtered: &[OfferingRecord]) -> AggregatedDistribution {
    let mut counts: BTreeMap<GradeBucketKey, u64> =
        GradeBucketKey::ALL.iter().map(|k| (*k, 0)).collect();

    for record in filtered {
        for (symbol, count) in &record.grades {
            if let Ok(key) = symbol.parse::<GradeBucketKey>() {
                let slot = counts.entry(key).or_default();
                *slot = slot.saturating_add(*count);
            }
        }
    }

    let total_count = counts.values().fold(0u64, |acc, c| acc.saturating_add(*c));

    let percentages = counts
        .iter()
        .map(|(key, count)| (*key, percent_tenths(*count, total_count)))
        .collect();

    let numeric_count = counts
        .iter()
        .filter(|(key, _)| key.points().is_some())
        .fold(0u64, |acc, (_, count)| acc.saturating_add(*count));

    let average_gpa = weighted_mean(
        counts
            .iter()
            .filter_map(|(key, count)| key.points().map(|p| (p, *count))),
    );

    let letter_grade = if numeric_count == 0 {
        None
    } else {
        Some(letter_for_gpa(average_gpa))
    };

    AggregatedDistribution {
        counts,
        percentages,
        total_count,
        numeric_count,
        average_gpa,
        letter_grade,
    }
}

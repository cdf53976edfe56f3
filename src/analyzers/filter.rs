//! Selection filtering and cross-filtered option lists.
//!
//! None of these functions touch the caller's [`Selection`]. When one axis
//! changes, the caller asks for the other axis's options again and decides
//! for itself whether to reset a value that is no longer offered (see
//! [`validate_axis`]).

use crate::analyzers::types::FilterOption;
use crate::records::{AxisFilter, OfferingRecord, Selection};
use std::collections::HashSet;

const ALL_TERMS: &str = "All Terms";
const ALL_INSTRUCTORS: &str = "All Instructors";

/// Returns the records that match `selection` on course, instructor and term.
pub fn filter_records(records: &[OfferingRecord], selection: &Selection) -> Vec<OfferingRecord> {
    records
        .iter()
        .filter(|r| {
            r.course_code == selection.course_code
                && selection.instructor.matches(&r.instructor)
                && selection.term.matches(&r.term)
        })
        .cloned()
        .collect()
}

/// Terms offered by `current_instructor` (or by anyone, for `Any`), newest
/// first, behind a synthetic "All Terms" entry.
///
/// Records are expected oldest first; the order is reversed, not re-sorted.
pub fn derive_term_options(
    records: &[OfferingRecord],
    current_instructor: &AxisFilter,
) -> Vec<FilterOption> {
    options_for(
        records,
        ALL_TERMS,
        |r| current_instructor.matches(&r.instructor),
        |r| &r.term,
    )
}

/// Instructors who taught in `current_term` (or in any term, for `Any`),
/// most recent first, behind a synthetic "All Instructors" entry.
pub fn derive_instructor_options(
    records: &[OfferingRecord],
    current_term: &AxisFilter,
) -> Vec<FilterOption> {
    options_for(
        records,
        ALL_INSTRUCTORS,
        |r| current_term.matches(&r.term),
        |r| &r.instructor,
    )
}

/// Keeps `current` if it is still one of `options`, otherwise falls back to
/// `Any`.
pub fn validate_axis(current: &AxisFilter, options: &[FilterOption]) -> AxisFilter {
    if options.iter().any(|o| &o.value == current) {
        current.clone()
    } else {
        AxisFilter::Any
    }
}

fn options_for<'a>(
    records: &'a [OfferingRecord],
    any_label: &str,
    keep: impl Fn(&OfferingRecord) -> bool,
    value: impl Fn(&'a OfferingRecord) -> &'a String,
) -> Vec<FilterOption> {
    let mut seen = HashSet::new();
    let mut options = vec![FilterOption::any(any_label)];

    for record in records.iter().rev() {
        if !keep(record) {
            continue;
        }
        let v = value(record);
        if seen.insert(v.as_str()) {
            options.push(FilterOption::only(v));
        }
    }

    options
}

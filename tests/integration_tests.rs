use grade_compare::analyzers::aggregate::aggregate;
use grade_compare::analyzers::compare::merge;
use grade_compare::analyzers::filter::{
    derive_instructor_options, derive_term_options, filter_records,
};
use grade_compare::analyzers::grade::GradeBucketKey;
use grade_compare::analyzers::snapshots::{add_snapshot, remove_snapshot};
use grade_compare::analyzers::types::{ComparisonSnapshot, SnapshotDraft};
use grade_compare::config::{CompareConfig, ComparisonContext};
use grade_compare::parser::parse_offerings_json;
use grade_compare::records::{AxisFilter, OfferingRecord, Selection};

fn fixture() -> Vec<OfferingRecord> {
    let bytes = include_bytes!("fixtures/offerings.json");
    parse_offerings_json(bytes).expect("Failed to parse fixture")
}

fn two_offerings() -> Vec<OfferingRecord> {
    fixture().into_iter().take(2).collect()
}

fn add(
    set: &[ComparisonSnapshot],
    id: &str,
    selection: &Selection,
    records: &[OfferingRecord],
    config: &CompareConfig,
) -> Vec<ComparisonSnapshot> {
    let draft = SnapshotDraft::from_selection(
        id.to_string(),
        selection,
        aggregate(&filter_records(records, selection)),
        None,
    );
    add_snapshot(set, draft, config.max_snapshots, &config.palette).into_snapshots()
}

#[test]
fn test_any_any_selection_scenario() {
    let records = two_offerings();
    let dist = aggregate(&filter_records(&records, &Selection::course("CS 101")));

    assert_eq!(dist.count(GradeBucketKey::A), 15);
    assert_eq!(dist.count(GradeBucketKey::B), 10);
    assert_eq!(dist.count(GradeBucketKey::F), 5);
    assert_eq!(dist.total_count, 30);
    assert_eq!(dist.percentage(GradeBucketKey::A), 50.0);
    assert_eq!(dist.percentage(GradeBucketKey::B), 33.3);
    assert_eq!(dist.percentage(GradeBucketKey::F), 16.7);
    assert!((dist.percentages.values().sum::<f64>() - 100.0).abs() < 1e-9);
    assert!((dist.average_gpa - 3.0).abs() < 1e-9);
}

#[test]
fn test_single_instructor_scenario() {
    let records = two_offerings();
    let selection = Selection::course("CS 101").with_instructor("Smith");
    let filtered = filter_records(&records, &selection);
    assert_eq!(filtered.len(), 1);

    let dist = aggregate(&filtered);
    assert_eq!(dist.count(GradeBucketKey::A), 10);
    assert_eq!(dist.count(GradeBucketKey::B), 10);
    assert_eq!(dist.percentage(GradeBucketKey::A), 50.0);
    assert_eq!(dist.percentage(GradeBucketKey::B), 50.0);
    assert_eq!(dist.average_gpa, 3.5);
}

#[test]
fn test_percentages_close_to_hundred() {
    let records = fixture();
    let selections = [
        Selection::course("CS 101"),
        Selection::course("CS 101").with_instructor("Jones"),
        Selection::course("CS 101").with_term("Fall 2024"),
        Selection::course("MATH 2"),
        Selection::course("CS 101").with_instructor("Smith"),
    ];

    for selection in &selections {
        let dist = aggregate(&filter_records(&records, selection));
        assert!(dist.total_count > 0, "{}", selection.label());

        // Each bucket rounds by at most half a tenth.
        let nonzero = dist.counts.values().filter(|c| **c > 0).count() as f64;
        let sum: f64 = dist.percentages.values().sum();
        assert!(
            (sum - 100.0).abs() <= 0.05 * nonzero + 1e-9,
            "{}: {sum}",
            selection.label()
        );
    }
}

#[test]
fn test_unknown_symbols_and_pass_fail_in_fixture() {
    let records = fixture();
    let dist = aggregate(&filter_records(
        &records,
        &Selection::course("MATH 2").with_term("Fall 2023"),
    ));

    // "I" is not a bucket and is skipped.
    assert_eq!(dist.total_count, 26);
    assert_eq!(dist.numeric_count, 24);
    assert_eq!(dist.percentage(GradeBucketKey::BMinus), 46.2);
    assert_eq!(dist.percentage(GradeBucketKey::NoPass), 7.7);
    assert!((dist.average_gpa - 56.1 / 24.0).abs() < 1e-9);
    assert_eq!(dist.letter_grade, Some(GradeBucketKey::CPlus));
}

#[test]
fn test_empty_match_is_zero_distribution() {
    let records = fixture();
    let dist = aggregate(&filter_records(
        &records,
        &Selection::course("MATH 2").with_term("Spring 2024"),
    ));
    assert_eq!(dist.total_count, 0);
    assert_eq!(dist.average_gpa, 0.0);
    assert!(dist.percentages.values().all(|p| *p == 0.0));

    let none = aggregate(&filter_records(&records, &Selection::course("PHYS 7")));
    assert_eq!(none, aggregate(&[]));
}

#[test]
fn test_gpa_bounds_over_every_option_pair() {
    let records = fixture();
    for course in ["CS 101", "MATH 2"] {
        let course_records: Vec<_> = records
            .iter()
            .filter(|r| r.course_code == course)
            .cloned()
            .collect();
        for instructor in derive_instructor_options(&course_records, &AxisFilter::Any) {
            for term in derive_term_options(&course_records, &instructor.value) {
                let selection = Selection::course(course)
                    .with_instructor(instructor.value.clone())
                    .with_term(term.value.clone());
                let once = filter_records(&records, &selection);
                assert_eq!(filter_records(&once, &selection), once);

                let gpa = aggregate(&once).average_gpa;
                assert!((0.0..=4.0).contains(&gpa), "{}: {gpa}", selection.label());
            }
        }
    }
}

#[test]
fn test_cross_filtered_options() {
    let records: Vec<_> = fixture()
        .into_iter()
        .filter(|r| r.course_code == "CS 101")
        .collect();

    let terms = derive_term_options(&records, &AxisFilter::from("Smith"));
    let labels: Vec<&str> = terms.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["All Terms", "Fall 2024", "Fall 2023"]);

    let instructors = derive_instructor_options(&records, &AxisFilter::from("Spring 2024"));
    let labels: Vec<&str> = instructors.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["All Instructors", "Jones"]);
}

#[test]
fn test_comparison_pipeline() {
    let records = fixture();
    let config = CompareConfig::for_context(ComparisonContext::Grades);

    let smith = Selection::course("CS 101").with_instructor("Smith");
    let jones = Selection::course("CS 101").with_instructor("Jones");
    let math = Selection::course("MATH 2");

    let mut set = add(&[], "1", &smith, &records, &config);
    set = add(&set, "2", &jones, &records, &config);
    set = add(&set, "3", &math, &records, &config);
    assert_eq!(set.len(), 3);

    // Capacity reached: the fourth add leaves the set untouched.
    let full = add(&set, "4", &Selection::course("CS 101"), &records, &config);
    assert_eq!(full, set);

    let rows = merge(&set);
    assert_eq!(rows.len(), 16);
    let a = rows.iter().find(|r| r.grade == GradeBucketKey::A).unwrap();
    assert_eq!(a.get("2"), Some(50.0));
    assert_eq!(a.get("3"), Some(0.0));

    let json = serde_json::to_value(a).unwrap();
    assert_eq!(json["grade"], "A");
    assert_eq!(json["2"], 50.0);

    // Removing a snapshot frees its slot and color.
    let set = remove_snapshot(&set, "2");
    let set = add(&set, "5", &Selection::course("CS 101"), &records, &config);
    assert_eq!(set.len(), 3);
    assert_eq!(set[2].color, config.palette[1]);
}

#[test]
fn test_merge_columns_independent_of_other_snapshots() {
    let records = fixture();
    let config = CompareConfig::for_context(ComparisonContext::Overview);
    let smith = Selection::course("CS 101").with_instructor("Smith");

    let base = add(&[], "1", &smith, &records, &config);
    let with_math = add(&base, "2", &Selection::course("MATH 2"), &records, &config);

    let mut altered = records.clone();
    altered.push(OfferingRecord::new("MATH 2", "Fall 2025", "Lee").with_grade("F", 90));
    let with_altered_math = add(&base, "2", &Selection::course("MATH 2"), &altered, &config);

    let before = merge(&with_math);
    let after = merge(&with_altered_math);
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.get("1"), a.get("1"));
    }
    assert_ne!(before, after);
}

//! Input data shapes: offering records, selections and instructor ratings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wire form of [`AxisFilter::Any`].
pub const ANY: &str = "ANY";

/// One historical offering of a course: a single term taught by a single
/// instructor, with the number of students that received each grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingRecord {
    pub course_code: String,
    pub term: String,
    pub instructor: String,
    /// Grade symbol to student count. Absent symbols mean zero; symbols
    /// that are not a known bucket are carried but never counted.
    #[serde(default)]
    pub grades: BTreeMap<String, u64>,
}

impl OfferingRecord {
    pub fn new(course_code: &str, term: &str, instructor: &str) -> Self {
        OfferingRecord {
            course_code: course_code.to_string(),
            term: term.to_string(),
            instructor: instructor.to_string(),
            grades: BTreeMap::new(),
        }
    }

    /// Sets the count for one grade symbol.
    pub fn with_grade(mut self, symbol: &str, count: u64) -> Self {
        self.grades.insert(symbol.to_string(), count);
        self
    }
}

/// One axis of a [`Selection`]: either every value, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AxisFilter {
    Any,
    Only(String),
}

impl AxisFilter {
    /// Exact, case-sensitive match.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            AxisFilter::Any => true,
            AxisFilter::Only(v) => v == value,
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            AxisFilter::Any => None,
            AxisFilter::Only(v) => Some(v.as_str()),
        }
    }
}

impl From<String> for AxisFilter {
    fn from(value: String) -> Self {
        if value == ANY {
            AxisFilter::Any
        } else {
            AxisFilter::Only(value)
        }
    }
}

impl From<&str> for AxisFilter {
    fn from(value: &str) -> Self {
        AxisFilter::from(value.to_string())
    }
}

impl From<AxisFilter> for String {
    fn from(value: AxisFilter) -> Self {
        match value {
            AxisFilter::Any => ANY.to_string(),
            AxisFilter::Only(v) => v,
        }
    }
}

impl fmt::Display for AxisFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisFilter::Any => f.write_str(ANY),
            AxisFilter::Only(v) => f.write_str(v),
        }
    }
}

/// What the user asked to see: one course, narrowed by instructor and term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub course_code: String,
    pub instructor: AxisFilter,
    pub term: AxisFilter,
}

impl Selection {
    /// A selection covering every offering of `course_code`.
    pub fn course(course_code: &str) -> Self {
        Selection {
            course_code: course_code.to_string(),
            instructor: AxisFilter::Any,
            term: AxisFilter::Any,
        }
    }

    pub fn with_instructor(mut self, instructor: impl Into<AxisFilter>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_term(mut self, term: impl Into<AxisFilter>) -> Self {
        self.term = term.into();
        self
    }

    /// Human-readable label, e.g. `CS 101 · Smith · All Terms`.
    pub fn label(&self) -> String {
        format!(
            "{} · {} · {}",
            self.course_code,
            self.instructor.as_option().unwrap_or("All Instructors"),
            self.term.as_option().unwrap_or("All Terms"),
        )
    }
}

/// Instructor rating data from an external review site.
///
/// Carried alongside a snapshot for display only; the engine never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSnapshot {
    pub avg_rating: f64,
    pub difficulty_level: f64,
    pub would_take_again_percent: f64,
    pub num_ratings: u32,
}

//! Traits for the external providers that feed the engine.
//!
//! Both are fetched up front: the engine only ever sees fully materialized
//! data, so failures stay here and never reach the aggregation code.

use anyhow::Result;
use grade_compare::records::{OfferingRecord, RatingSnapshot};

/// Supplies the historical offerings of a course.
#[async_trait::async_trait]
pub trait OfferingSource: Send + Sync {
    /// Returns every offering of `course_code`, oldest first. An unknown
    /// course yields an empty list.
    async fn offerings(&self, course_code: &str) -> Result<Vec<OfferingRecord>>;
}

/// Supplies review-site ratings for an instructor.
#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    /// Returns `None` when the instructor has no ratings.
    async fn rating(&self, instructor: &str) -> Result<Option<RatingSnapshot>>;
}

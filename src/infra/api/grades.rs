use anyhow::{Context, Result};
use async_trait::async_trait;
use grade_compare::fetch::{HttpClient, fetch_bytes};
use grade_compare::parser::parse_offerings_json;
use grade_compare::records::OfferingRecord;
use tracing::debug;

use super::endpoint;
use crate::services::sources::OfferingSource;

/// Fetches offerings from `GET {base_url}/courses/{course}/offerings`, which
/// answers with a JSON array of records.
pub struct GradesApiClient<C> {
    base_url: String,
    http: C,
}

impl<C: HttpClient> GradesApiClient<C> {
    pub fn new(base_url: impl Into<String>, http: C) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl<C: HttpClient> OfferingSource for GradesApiClient<C> {
    async fn offerings(&self, course_code: &str) -> Result<Vec<OfferingRecord>> {
        let url = endpoint(&self.base_url, &["courses", course_code, "offerings"])?;
        let bytes = fetch_bytes(&self.http, url.as_str())
            .await
            .with_context(|| format!("fetching offerings for {course_code}"))?;
        debug!(course_code, bytes = bytes.len(), "Offerings received, parsing");

        parse_offerings_json(&bytes).with_context(|| format!("parsing offerings for {course_code}"))
    }
}

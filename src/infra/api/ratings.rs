use anyhow::{Context, Result};
use async_trait::async_trait;
use grade_compare::fetch::{HttpClient, fetch_optional_bytes};
use grade_compare::records::RatingSnapshot;
use tracing::debug;

use super::endpoint;
use crate::services::sources::RatingSource;

/// Fetches ratings from `GET {base_url}/instructors/{name}/rating`.
///
/// A 404 or a `null` body both mean the instructor has no ratings.
pub struct RatingsApiClient<C> {
    base_url: String,
    http: C,
}

impl<C: HttpClient> RatingsApiClient<C> {
    pub fn new(base_url: impl Into<String>, http: C) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl<C: HttpClient> RatingSource for RatingsApiClient<C> {
    async fn rating(&self, instructor: &str) -> Result<Option<RatingSnapshot>> {
        let url = endpoint(&self.base_url, &["instructors", instructor, "rating"])?;
        let Some(bytes) = fetch_optional_bytes(&self.http, url.as_str()).await? else {
            debug!(instructor, "No ratings found");
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing rating for {instructor}"))
    }
}

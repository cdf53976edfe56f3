//! HTTP clients for the grade and rating APIs.

mod grades;
mod ratings;

pub use grades::GradesApiClient;
pub use ratings::RatingsApiClient;

use anyhow::{Result, anyhow};
use reqwest::Url;

/// Joins `segments` onto `base_url`, percent-encoding each one.
fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("{base_url} cannot be used as a base URL"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

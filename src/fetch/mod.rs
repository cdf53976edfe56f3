//! HTTP plumbing for the offering and rating sources.

mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, bail};
use reqwest::StatusCode;

/// Fetches `url` and returns the response body.
///
/// # Errors
///
/// Returns an error on transport failure or any non-success status.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    match fetch_optional_bytes(client, url).await? {
        Some(bytes) => Ok(bytes),
        None => bail!("{url} returned 404 Not Found"),
    }
}

/// Like [`fetch_bytes`], but a 404 yields `Ok(None)` instead of an error.
pub async fn fetch_optional_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Option<Vec<u8>>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("{url} returned status {status}: {body}");
    }
    Ok(Some(resp.bytes().await?.to_vec()))
}

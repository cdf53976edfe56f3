use crate::fetch::client::HttpClient;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// An [`HttpClient`] wrapper that sends `Authorization: Bearer <key>` with
/// every request, for grade APIs that sit behind a token.
pub struct ApiKey<C> {
    inner: C,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// Fails if `key` cannot be carried in an HTTP header.
    pub fn bearer(inner: C, key: &str) -> Result<Self> {
        let mut value = HeaderValue::from_str(&format!("Bearer {key}"))?;
        value.set_sensitive(true);
        Ok(Self { inner, value })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(AUTHORIZATION, self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_bearer_rejects_header_breaking_key() {
        let client = BasicClient::new().unwrap();
        assert!(ApiKey::bearer(client, "abc\ndef").is_err());
    }

    #[test]
    fn test_bearer_value_is_sensitive() {
        let client = BasicClient::new().unwrap();
        let wrapped = ApiKey::bearer(client, "secret").unwrap();
        assert!(wrapped.value.is_sensitive());
        assert_eq!(wrapped.value.to_str().unwrap(), "Bearer secret");
    }
}

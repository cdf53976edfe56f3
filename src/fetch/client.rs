use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes prepared requests; wrappers layer credentials on top of it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

mod reqwest_client;

pub use reqwest_client::ReqwestClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Status and raw body of a response. Interpreting either is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON to the vote server.
///
/// Only transport failures are errors; a 4xx/5xx still comes back as an
/// [`HttpResponse`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(302, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }
}

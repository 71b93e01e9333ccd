use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use super::{HttpClient, HttpResponse};
use crate::config::WidgetConfig;
use crate::error::Result;

/// [`HttpClient`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestClient {
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(&self, path: &str, body: &Value) -> Result<HttpResponse> {
        let url = self.url_for(path);
        debug!("POST {} {}", url, body);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(HttpResponse::new(status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_single_slash() {
        let config = WidgetConfig {
            server_url: "http://localhost:8080/".to_string(),
            ..WidgetConfig::default()
        };
        let client = ReqwestClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url_for("/vote"), "http://localhost:8080/vote");
        assert_eq!(client.url_for("vote"), "http://localhost:8080/vote");
    }
}

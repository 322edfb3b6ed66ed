use anyhow::Context;
use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

use crate::upstream_status_error::UpstreamStatusError;

/// Status code and raw body of one upstream GET.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn into_success_body(self) -> Result<String, UpstreamStatusError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(UpstreamStatusError {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// Anything that can answer a plain GET for the provider's endpoints.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, url: &str) -> anyhow::Result<UpstreamResponse>;
}

pub struct RequestClient {
    client: Client,
}

impl RequestClient {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).context("user agent is not a valid header value")?,
        );
        let client = ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("failed to build http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for RequestClient {
    async fn fetch(&self, url: &str) -> anyhow::Result<UpstreamResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body from {url}"))?;
        Ok(UpstreamResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}

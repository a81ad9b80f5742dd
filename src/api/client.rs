//! HTTP client for the meal max service

use std::time::Duration;

use async_trait::async_trait;

use crate::common::config::HttpConfig;
use crate::common::{join_url, Error, Result};

use super::request::{ApiRequest, ApiResponse};

/// Something that can carry one request to the service and bring back a body
///
/// The runner only talks to this trait, so tests can swap in a canned
/// transport without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Base URL requests are resolved against (for display only)
    fn base_url(&self) -> &str;

    /// Send exactly one request; never retries
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a client for `base_url`
    pub fn new(base_url: &str, http: &HttpConfig) -> Result<Self> {
        reqwest::Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let mut builder = reqwest::Client::builder().user_agent(http.user_agent.clone());
        if let Some(secs) = http.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a request path
    pub fn url_for(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(request.method.as_str(), &url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(request.method.as_str(), &url, e))?;

        tracing::debug!(status, bytes = body.len(), "response received");

        Ok(ApiResponse { status, body })
    }
}

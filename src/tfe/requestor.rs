//! HTTP verbs against the Terraform API v2 base URI

use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::config::{api, defaults};
use crate::error::{Result, TfeError};
use crate::logging::LogHandle;

use super::query::Query;
use super::response::ApiResponse;

/// Shared HTTP requestor used by every resource client
///
/// `get` never fails because of the response status; inspect
/// [`ApiResponse::error`] or call [`ApiResponse::error_for_status`].
/// `post`, `patch` and `delete` fail on any 4xx/5xx.
#[derive(Debug)]
pub struct Requestor {
    client: Client,
    token: String,
    base_uri: String,
    pub(crate) page_limit: u32,
    pub(crate) log: LogHandle,
}

impl Requestor {
    /// Create a requestor with pooled connections and fixed timeouts
    ///
    /// `verify = false` accepts invalid TLS certificates (self-signed TFE installs).
    pub fn new(token: String, base_uri: String, verify: bool, log: LogHandle) -> Result<Self> {
        let mut builder = Client::builder()
            // Connection pool settings - reuse connections
            .pool_max_idle_per_host(20)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS));

        if !verify {
            log.warn(format_args!("TLS certificate verification is disabled"));
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| TfeError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token,
            base_uri: base_uri.trim_end_matches('/').to_string(),
            page_limit: api::MAX_PAGES,
            log,
        })
    }

    /// Base URI every path is appended to (e.g. `https://app.terraform.io/api/v2`)
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Join base URI, path and rendered query
    fn url(&self, path: &str, query: &Query) -> Result<String> {
        if path.contains('?') {
            return Err(TfeError::Config(format!(
                "request path '{}' must not carry a query string",
                path
            )));
        }
        Ok(format!("{}{}{}", self.base_uri, path, query.build()?))
    }

    /// Add standard headers to a request builder
    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", api::MEDIA_TYPE)
    }

    /// GET a path with query parameters
    pub async fn get(&self, path: &str, query: &Query) -> Result<ApiResponse> {
        let url = self.url(path, query)?;
        self.log.debug(format_args!("Sending HTTP GET to {}", url));

        let response = self.with_headers(self.client.get(&url)).send().await?;
        let response = ApiResponse::from_response(response).await?;

        if let Some(err) = response.error() {
            self.log.debug(format_args!("GET {} returned {}", url, err));
        }
        Ok(response)
    }

    /// POST an optional JSON:API payload; fails on 4xx/5xx
    pub async fn post(&self, path: &str, payload: Option<&Value>) -> Result<ApiResponse> {
        self.send_mutation(Method::POST, path, payload).await
    }

    /// PATCH a JSON:API payload; fails on 4xx/5xx
    pub async fn patch(&self, path: &str, payload: &Value) -> Result<ApiResponse> {
        self.send_mutation(Method::PATCH, path, Some(payload)).await
    }

    /// DELETE with an optional payload; fails on 4xx/5xx
    pub async fn delete(&self, path: &str, payload: Option<&Value>) -> Result<ApiResponse> {
        self.send_mutation(Method::DELETE, path, payload).await
    }

    /// PUT raw bytes to an absolute URL outside the API (archivist upload links)
    pub async fn put_bytes(&self, url: &str, body: Vec<u8>) -> Result<ApiResponse> {
        self.log.debug(format_args!(
            "Sending HTTP PUT of {} bytes to {}",
            body.len(),
            url
        ));
        let response = self
            .client
            .put(url)
            .header("Content-Type", "application/octet-stream")
            .body(body)
            .send()
            .await?;
        ApiResponse::from_response(response)
            .await?
            .error_for_status()
    }

    async fn send_mutation(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.url(path, &Query::default())?;
        self.log
            .debug(format_args!("Sending HTTP {} to {}", method, url));

        let mut request = self.with_headers(self.client.request(method.clone(), &url));
        if let Some(payload) = payload {
            if self.log.enabled(log::Level::Trace) {
                let pretty = serde_json::to_string_pretty(payload)?;
                self.log.trace(format_args!("{}", pretty));
            }
            request = request.json(payload);
        }

        let response = ApiResponse::from_response(request.send().await?).await?;
        response.error_for_status().inspect_err(|err| {
            self.log
                .debug(format_args!("{} {} failed: {}", method, url, err));
        })
    }
}

#[cfg(test)]
impl Requestor {
    /// Requestor pointed at a mock server
    pub fn test_requestor(base_uri: &str) -> Self {
        Self::new(
            "test-token".to_string(),
            base_uri.to_string(),
            true,
            LogHandle::default(),
        )
        .unwrap()
    }

    /// Lower the page cap so the safety valve can be exercised cheaply
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }
}

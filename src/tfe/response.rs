//! Uniform view over an API response
//!
//! The body is read once and parsed as JSON when possible. The error for a
//! 4xx/5xx status is derived on demand, so building a response never fails
//! because of its status.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;

use crate::error::{Result, TfeError};

/// Read-only response wrapper returned by every requestor call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    url: String,
    headers: HeaderMap,
    body: Vec<u8>,
    data: Option<Value>,
}

impl ApiResponse {
    /// Consume a reqwest response, reading its full body
    pub(crate) async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self::from_parts(status, url, headers, body))
    }

    /// Build a response from raw parts; the body is parsed if it is JSON
    pub fn from_parts(status: u16, url: String, headers: HeaderMap, body: Vec<u8>) -> Self {
        let data = if body.is_empty() {
            None
        } else {
            serde_json::from_slice(&body).ok()
        };
        Self {
            status,
            url,
            headers,
            body,
            data,
        }
    }

    /// Synthetic response for results aggregated over several requests
    pub(crate) fn aggregated(url: String, headers: HeaderMap, document: Value) -> Self {
        let body = serde_json::to_vec(&document).unwrap_or_default();
        Self {
            status: 200,
            url,
            headers,
            body,
            data: Some(document),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parsed JSON body, `None` when empty or not JSON
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// The error this response represents, if its status is 400 or above
    pub fn error(&self) -> Option<TfeError> {
        if self.status < 400 {
            return None;
        }
        Some(TfeError::Api {
            status: self.status,
            message: self.error_message(),
        })
    }

    /// Fail-fast variant: turn a 4xx/5xx response into an error
    pub fn error_for_status(self) -> Result<Self> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    /// Decode the top-level `data` member into a typed model
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let member = self
            .data
            .as_ref()
            .and_then(|doc| doc.get("data"))
            .ok_or_else(|| TfeError::Json(format!("response from {} has no `data` member", self.url)))?;
        serde_json::from_value(member.clone()).map_err(|e| {
            TfeError::Json(format!("failed to decode `data` from {}: {}", self.url, e))
        })
    }

    /// The `data.id` of a single-resource document
    pub fn resource_id(&self) -> Result<&str> {
        self.data
            .as_ref()
            .and_then(|doc| doc.pointer("/data/id"))
            .and_then(Value::as_str)
            .ok_or_else(|| TfeError::Json(format!("response from {} has no `data.id`", self.url)))
    }

    /// Items of a list document (`data` array), empty when absent
    pub fn items(&self) -> &[Value] {
        self.member_array("data")
    }

    /// Related resources (`included` array), empty when absent
    pub fn included(&self) -> &[Value] {
        self.member_array("included")
    }

    fn member_array(&self, key: &str) -> &[Value] {
        self.data
            .as_ref()
            .and_then(|doc| doc.get(key))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Best-effort message from a JSON:API error document
    fn error_message(&self) -> String {
        self.data
            .as_ref()
            .and_then(|doc| doc.pointer("/errors/0/detail"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {} error", self.status))
    }
}

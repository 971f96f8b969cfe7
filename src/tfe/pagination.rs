//! Multi-page list aggregation
//!
//! The API reports page metadata in one of two shapes:
//!
//! - `{"meta": {"pagination": {"current-page": N, "total-pages": N}}}`
//! - `{"pagination": {"total-pages": N}}` (some older endpoints spell it `total_pages`)
//!
//! Pages are fetched one after another, page 1 first, at the maximum page size.

use serde_json::{json, Value};
use std::collections::HashSet;

use crate::config::api;
use crate::error::Result;

use super::query::Query;
use super::requestor::Requestor;
use super::response::ApiResponse;

/// Page counters extracted from a list document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total_pages: u32,
    pub current_page: Option<u32>,
}

impl PageInfo {
    /// Read pagination metadata, checking `meta.pagination` first
    ///
    /// Returns `None` when neither shape is present or the total is not a
    /// positive integer.
    pub fn from_document(document: &Value) -> Option<Self> {
        if let Some(pagination) = document.pointer("/meta/pagination") {
            return Some(Self {
                total_pages: page_number(pagination.get("total-pages"))?,
                current_page: page_number(pagination.get("current-page")),
            });
        }

        let pagination = document.get("pagination")?;
        let total = pagination
            .get("total-pages")
            .or_else(|| pagination.get("total_pages"));
        Some(Self {
            total_pages: page_number(total)?,
            current_page: None,
        })
    }

    /// True when the document describes the last page (or beyond)
    pub fn is_last(&self, requested_page: u32) -> bool {
        self.current_page == Some(self.total_pages) || requested_page >= self.total_pages
    }
}

fn page_number(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}

/// Accumulates `data` and `included` across pages
///
/// `data` keeps the server's order. `included` drops repeats of the same
/// `(type, id)`, keeping the first occurrence; entries lacking either member
/// are kept as-is.
#[derive(Debug, Default)]
pub(crate) struct PageCollector {
    data: Vec<Value>,
    included: Vec<Value>,
    seen: HashSet<(String, String)>,
}

impl PageCollector {
    pub(crate) fn extend_data(&mut self, items: &[Value]) {
        self.data.extend_from_slice(items);
    }

    pub(crate) fn extend_included(&mut self, items: &[Value]) {
        for item in items {
            match resource_key(item) {
                Some(key) => {
                    if self.seen.insert(key) {
                        self.included.push(item.clone());
                    }
                }
                None => self.included.push(item.clone()),
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn into_document(self) -> Value {
        json!({
            "data": self.data,
            "included": self.included,
        })
    }
}

fn resource_key(item: &Value) -> Option<(String, String)> {
    let kind = item.get("type")?.as_str()?;
    let id = item.get("id")?.as_str()?;
    Some((kind.to_string(), id.to_string()))
}

/// Items of one page: the `data` array, or a lone `data` object
fn page_items(document: &Value) -> Vec<Value> {
    match document.get("data") {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(single) => vec![single.clone()],
    }
}

impl Requestor {
    /// Fetch every page of a list endpoint and merge them into one response
    ///
    /// Paging parameters in `query` are overridden. Any failed page aborts the
    /// whole call; no partial result is returned. The returned response has a
    /// synthetic status of 200 and the body `{"data": [...], "included": [...]}`.
    pub async fn list_all(&self, path: &str, query: &Query) -> Result<ApiResponse> {
        let mut collector = PageCollector::default();
        let mut current_page: u32 = 1;
        let last_response = loop {
            let page_query = query.at_page(current_page, api::MAX_PAGE_SIZE);
            let response = self
                .get(path, &page_query)
                .await
                .and_then(ApiResponse::error_for_status)
                .inspect_err(|e| {
                    self.log.error(format_args!(
                        "Error fetching page {} of {}: {}",
                        current_page, path, e
                    ));
                })?;

            let (items, included, page_info) = match response.data() {
                Some(document) => (
                    page_items(document),
                    document
                        .get("included")
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default(),
                    PageInfo::from_document(document),
                ),
                None => (Vec::new(), Vec::new(), None),
            };

            if items.is_empty() {
                self.log
                    .debug(format_args!("Page {} of {} is empty", current_page, path));
                break response;
            }
            collector.extend_data(&items);

            if !included.is_empty() {
                self.log
                    .debug(format_args!("Found `included` block in list response"));
                collector.extend_included(&included);
            }

            let info = match page_info {
                Some(info) => info,
                None => {
                    self.log.debug(format_args!(
                        "No pagination info found for {}, assuming single page",
                        path
                    ));
                    break response;
                }
            };

            self.log.debug(format_args!(
                "Page {}/{} of {}, {} items so far",
                current_page,
                info.total_pages,
                path,
                collector.len()
            ));

            if info.is_last(current_page) {
                break response;
            }

            current_page += 1;
            if current_page > self.page_limit {
                self.log.warn(format_args!(
                    "Reached maximum page limit ({}) for {}, stopping pagination",
                    self.page_limit, path
                ));
                break response;
            }
        };

        let url = last_response.url().to_string();
        let headers = last_response.headers().clone();
        Ok(ApiResponse::aggregated(url, headers, collector.into_document()))
    }
}

//! Query string construction for list and show endpoints
//!
//! All query strings are built here so that the encoding of filters, paging,
//! includes and searches is identical whichever resource issued the request.
//! Fragments are always emitted in the same order: filters, `page[number]`,
//! `page[size]`, `include`, `search[*]`, `q`, `since`.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::api;
use crate::error::{Result, TfeError};

/// One page of a list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }
}

impl Default for Page {
    /// First page at the API's default size of 20
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// Structured search parameters (`search[...]`)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Search {
    pub name: Option<String>,
    pub tags: Option<String>,
    pub exclude_tags: Option<String>,
    pub version: Option<String>,
    pub user: Option<String>,
    pub commit: Option<String>,
}

impl Search {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn tags(tags: impl Into<String>) -> Self {
        Self {
            tags: Some(tags.into()),
            ..Self::default()
        }
    }

    /// Recognized keys paired with their values, in emission order
    fn entries(&self) -> [(&'static str, Option<&String>); 6] {
        [
            ("name", self.name.as_ref()),
            ("tags", self.tags.as_ref()),
            ("exclude-tags", self.exclude_tags.as_ref()),
            ("version", self.version.as_ref()),
            ("user", self.user.as_ref()),
            ("commit", self.commit.as_ref()),
        ]
    }
}

/// Query parameters accepted by GET endpoints
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    /// Filter fragments in the form `[field]=value` or `[a][b]=value`
    pub filters: Option<Vec<String>>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
    /// Comma-separated related resources (`include=a,b`)
    pub include: Option<String>,
    pub search: Option<Search>,
    /// Free-text query (`q=`)
    pub query: Option<String>,
    pub since: Option<DateTime<Utc>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, fragment: impl Into<String>) -> Self {
        self.filters
            .get_or_insert_with(Vec::new)
            .push(fragment.into());
        self
    }

    pub fn page(mut self, number: u32, size: u32) -> Self {
        self.page_number = Some(number);
        self.page_size = Some(size);
        self
    }

    /// Apply an optional page; `None` leaves paging to the server
    pub fn paged(self, page: Option<Page>) -> Self {
        match page {
            Some(page) => self.page(page.number, page.size),
            None => self,
        }
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    pub fn search(mut self, search: Search) -> Self {
        self.search = Some(search);
        self
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    /// Copy of this query positioned at a given page
    pub(crate) fn at_page(&self, number: u32, size: u32) -> Self {
        self.clone().page(number, size)
    }

    /// Render the query string, including the leading `?`
    ///
    /// Returns an empty string when no parameter is set.
    pub fn build(&self) -> Result<String> {
        let mut parts = Vec::new();

        if let Some(ref filters) = self.filters {
            for fragment in filters {
                parts.push(format!("filter{}", encode_fragment(fragment)?));
            }
        }
        if let Some(number) = self.page_number {
            parts.push(format!("page[number]={}", number));
        }
        if let Some(size) = self.page_size {
            if size == 0 || size > api::MAX_PAGE_SIZE {
                return Err(TfeError::invalid_param(
                    "page_size",
                    &size.to_string(),
                    &["1..=100"],
                ));
            }
            parts.push(format!("page[size]={}", size));
        }
        if let Some(ref include) = self.include {
            parts.push(format!("include={}", encode_list(include)));
        }
        if let Some(ref search) = self.search {
            for (key, value) in search.entries() {
                if let Some(value) = value {
                    parts.push(format!("search[{}]={}", key, urlencoding::encode(value)));
                }
            }
        }
        if let Some(ref q) = self.query {
            parts.push(format!("q={}", urlencoding::encode(q)));
        }
        if let Some(since) = self.since {
            let stamp = since.to_rfc3339_opts(SecondsFormat::Secs, true);
            parts.push(format!("since={}", urlencoding::encode(&stamp)));
        }

        if parts.is_empty() {
            Ok(String::new())
        } else {
            Ok(format!("?{}", parts.join("&")))
        }
    }
}

/// Validate a `[field]=value` filter fragment and encode its value
fn encode_fragment(fragment: &str) -> Result<String> {
    let (key, value) = fragment
        .split_once('=')
        .filter(|(key, _)| key.starts_with('[') && key.ends_with(']'))
        .ok_or_else(|| TfeError::invalid_param("filters", fragment, &["[field]=value"]))?;
    Ok(format!("{}={}", key, urlencoding::encode(value)))
}

/// Encode each comma-separated item, keeping the commas
fn encode_list(list: &str) -> String {
    list.split(',')
        .map(|item| urlencoding::encode(item.trim()).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

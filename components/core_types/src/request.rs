//! Outgoing request types.
//!
//! This module provides the HTTP-shaped request description that clients hand
//! to a backend. Requests are plain values: two requests with the same method,
//! URL, parameters and body compare equal, which is what request matching keys
//! on.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Retrieve a resource
    Get,
    /// Create a resource
    Post,
    /// Replace or update a resource
    Put,
    /// Partially update a resource
    Patch,
    /// Remove a resource
    Delete,
}

impl HttpMethod {
    /// Returns the canonical upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query parameters.
///
/// Insertion order is preserved so the rendered query string is stable.
/// Setting an existing key replaces its value in place.
///
/// # Examples
///
/// ```
/// use core_types::HttpParams;
///
/// let params = HttpParams::new()
///     .set("courseId", "12")
///     .set("pageSize", "3");
///
/// assert_eq!(params.get("courseId"), Some("12"));
/// assert_eq!(params.to_query_string(), "courseId=12&pageSize=3");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HttpParams {
    entries: Vec<(String, String)>,
}

impl HttpParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns a copy with `key` set to `value`.
    pub fn set(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Looks up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns all keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns all entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders `key=value` pairs joined by `&`.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A request issued through an HTTP backend.
///
/// # Examples
///
/// ```
/// use core_types::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::get("/api/courses/12");
/// assert_eq!(request.method, HttpMethod::Get);
/// assert_eq!(request.signature(), "GET /api/courses/12");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Request method
    pub method: HttpMethod,
    /// Path or absolute URL, without the query string
    pub url: String,
    /// Query parameters
    pub params: HttpParams,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Creates a request with no parameters and no body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: HttpParams::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a PUT request carrying `body`.
    pub fn put(url: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, url).with_body(body)
    }

    /// Replaces the query parameters.
    pub fn with_params(mut self, params: HttpParams) -> Self {
        self.params = params;
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// URL including the rendered query string.
    pub fn url_with_params(&self) -> String {
        if self.params.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.params.to_query_string())
        }
    }

    /// One-line description used in diagnostics: method, URL with query and
    /// body when present.
    pub fn signature(&self) -> String {
        match &self.body {
            Some(body) => format!("{} {} {}", self.method, self.url_with_params(), body),
            None => format!("{} {}", self.method, self.url_with_params()),
        }
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature())
    }
}

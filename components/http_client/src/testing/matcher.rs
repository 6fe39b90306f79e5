//! Criteria for selecting outstanding requests.

use core_types::{HttpMethod, HttpRequest};
use std::fmt;
use std::sync::Arc;

type Predicate = Arc<dyn Fn(&HttpRequest) -> bool + Send + Sync>;

/// Selects outstanding requests.
///
/// URL criteria compare against the URL *including* its query string, so a
/// request carrying parameters is easiest to select with a predicate.
///
/// # Examples
///
/// ```
/// use core_types::{HttpMethod, HttpParams, HttpRequest};
/// use http_client::testing::RequestMatcher;
///
/// let request = HttpRequest::get("/api/lessons")
///     .with_params(HttpParams::new().set("courseId", 12));
///
/// assert!(!RequestMatcher::from("/api/lessons").matches(&request));
/// assert!(RequestMatcher::from("/api/lessons?courseId=12").matches(&request));
/// assert!(RequestMatcher::predicate("url is /api/lessons", |r| r.url == "/api/lessons")
///     .matches(&request));
/// assert!(!RequestMatcher::method_url(HttpMethod::Put, "/api/lessons?courseId=12")
///     .matches(&request));
/// ```
#[derive(Clone)]
pub enum RequestMatcher {
    /// Any method, URL with query string equal
    Url(String),
    /// Method and URL with query string equal
    MethodUrl(HttpMethod, String),
    /// Method, URL, parameters and body all equal
    Exact(HttpRequest),
    /// Arbitrary test over the request
    Predicate {
        /// Shown in failure messages
        description: String,
        /// The test
        predicate: Predicate,
    },
}

impl RequestMatcher {
    /// Matches on URL alone.
    pub fn url(url: impl Into<String>) -> Self {
        RequestMatcher::Url(url.into())
    }

    /// Matches on method and URL.
    pub fn method_url(method: HttpMethod, url: impl Into<String>) -> Self {
        RequestMatcher::MethodUrl(method, url.into())
    }

    /// Matches a request equal to `request`.
    pub fn exact(request: HttpRequest) -> Self {
        RequestMatcher::Exact(request)
    }

    /// Matches requests for which `predicate` returns true.
    pub fn predicate<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&HttpRequest) -> bool + Send + Sync + 'static,
    {
        RequestMatcher::Predicate {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Tests `request` against the criteria.
    pub fn matches(&self, request: &HttpRequest) -> bool {
        match self {
            RequestMatcher::Url(url) => request.url_with_params() == *url,
            RequestMatcher::MethodUrl(method, url) => {
                request.method == *method && request.url_with_params() == *url
            }
            RequestMatcher::Exact(expected) => request == expected,
            RequestMatcher::Predicate { predicate, .. } => predicate(request),
        }
    }
}

impl fmt::Display for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestMatcher::Url(url) => write!(f, "Match URL: {}", url),
            RequestMatcher::MethodUrl(method, url) => {
                write!(f, "Match method: {}, URL: {}", method, url)
            }
            RequestMatcher::Exact(request) => write!(f, "Match request: {}", request),
            RequestMatcher::Predicate { description, .. } => {
                write!(f, "Match by function: {}", description)
            }
        }
    }
}

impl fmt::Debug for RequestMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestMatcher({})", self)
    }
}

impl From<&str> for RequestMatcher {
    fn from(url: &str) -> Self {
        RequestMatcher::url(url)
    }
}

impl From<String> for RequestMatcher {
    fn from(url: String) -> Self {
        RequestMatcher::Url(url)
    }
}

impl From<(HttpMethod, &str)> for RequestMatcher {
    fn from((method, url): (HttpMethod, &str)) -> Self {
        RequestMatcher::method_url(method, url)
    }
}

impl From<HttpRequest> for RequestMatcher {
    fn from(request: HttpRequest) -> Self {
        RequestMatcher::Exact(request)
    }
}

//! Response and error envelope types.
//!
//! A backend settles every request with either an [`HttpResponse`] (2xx) or an
//! [`HttpErrorResponse`] (anything else, including network failures reported
//! with status 0).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Status used for a response that never reached the server.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Returns the reason phrase for common status codes.
pub fn default_status_text(status: u16) -> &'static str {
    match status {
        0 => "Unknown Error",
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// Returns true for 2xx statuses.
pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// A successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code, always 2xx
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Decoded JSON body
    pub body: Value,
}

impl HttpResponse {
    /// A `200 OK` response carrying `body`.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            status_text: default_status_text(200).to_string(),
            body,
        }
    }
}

/// Status, reason phrase and body used to fail a request.
///
/// # Examples
///
/// ```
/// use core_types::ErrorSpec;
/// use serde_json::json;
///
/// let spec = ErrorSpec::new(500, "Internal Server Error").with_body(json!("Save course failed"));
/// assert_eq!(spec.status, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSpec {
    /// Status code
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Error body sent by the server
    pub body: Value,
}

impl ErrorSpec {
    /// Creates a spec with a null body.
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: Value::Null,
        }
    }

    /// Creates a spec using the standard reason phrase for `status`.
    pub fn status(status: u16) -> Self {
        Self::new(status, default_status_text(status))
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }
}

/// A failed response as seen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpErrorResponse {
    /// Status code (0 for network failures)
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Error body sent by the server
    pub body: Value,
    /// URL of the failed request
    pub url: String,
}

impl HttpErrorResponse {
    /// Builds the error for `url` from a spec.
    pub fn from_spec(url: impl Into<String>, spec: ErrorSpec) -> Self {
        Self {
            status: spec.status,
            status_text: spec.status_text,
            body: spec.body,
            url: url.into(),
        }
    }

    /// Returns true for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Returns true when the request never reached a server.
    pub fn is_network_error(&self) -> bool {
        self.status == NETWORK_ERROR_STATUS
    }
}

impl fmt::Display for HttpErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Http failure response for {}: {} {}",
            self.url, self.status, self.status_text
        )
    }
}

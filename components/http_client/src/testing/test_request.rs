//! A request selected from the mock transport.

use super::transport::MockTransport;
use crate::error::TransportError;
use core_types::{ErrorSpec, HttpMethod, HttpParams, HttpRequest};
use serde_json::Value;
use std::fmt;

/// Identity of a recorded request, unique per transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub(crate) u64);

impl RequestId {
    /// Returns the raw id.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An outstanding request returned by a match, ready to be answered.
///
/// The flush methods delegate to the transport that recorded the request.
#[derive(Clone)]
pub struct TestRequest {
    id: RequestId,
    request: HttpRequest,
    transport: MockTransport,
}

impl TestRequest {
    pub(crate) fn new(id: RequestId, request: HttpRequest, transport: MockTransport) -> Self {
        Self {
            id,
            request,
            transport,
        }
    }

    /// Request id.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// The recorded request.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Request method.
    pub fn method(&self) -> HttpMethod {
        self.request.method
    }

    /// Request URL without query string.
    pub fn url(&self) -> &str {
        &self.request.url
    }

    /// Query parameters.
    pub fn params(&self) -> &HttpParams {
        &self.request.params
    }

    /// Request body.
    pub fn body(&self) -> Option<&Value> {
        self.request.body.as_ref()
    }

    /// Returns true until the request is answered.
    pub fn is_outstanding(&self) -> bool {
        self.transport.is_outstanding(self.id)
    }

    pub(crate) fn transport(&self) -> &MockTransport {
        &self.transport
    }

    /// Answers with `200 OK` and `body`.
    pub fn flush(&self, body: Value) -> Result<(), TransportError> {
        self.transport.flush(self, body)
    }

    /// Fails the request with `spec`.
    pub fn flush_error(&self, spec: ErrorSpec) -> Result<(), TransportError> {
        self.transport.flush_error(self, spec)
    }

    /// Answers with an explicit status; 2xx succeeds, anything else fails.
    pub fn respond(
        &self,
        status: u16,
        status_text: &str,
        body: Value,
    ) -> Result<(), TransportError> {
        self.transport.respond(self, status, status_text, body)
    }

    /// Fails the request as if it never reached a server.
    pub fn flush_network_error(&self, message: &str) -> Result<(), TransportError> {
        self.transport.flush_network_error(self, message)
    }
}

impl fmt::Debug for TestRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRequest")
            .field("id", &self.id)
            .field("request", &self.request)
            .finish()
    }
}

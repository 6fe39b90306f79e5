//! Mock transport that records requests and settles them on demand.

use super::matcher::RequestMatcher;
use super::test_request::{RequestId, TestRequest};
use crate::backend::{HttpBackend, ResponseHandle};
use crate::error::TransportError;
use async_runtime::{Promise, VirtualScheduler};
use core_types::{
    is_success, ErrorSpec, HttpErrorResponse, HttpRequest, HttpResponse, NETWORK_ERROR_STATUS,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

struct PendingRequest {
    request: HttpRequest,
    response: ResponseHandle,
}

#[derive(Default)]
struct TransportState {
    next_id: u64,
    outstanding: BTreeMap<RequestId, PendingRequest>,
}

/// In-memory stand-in for a network backend.
///
/// Every [`send`](HttpBackend::send) records the request and returns a
/// pending handle; nothing settles until the test flushes the request.
/// Flushing drains the scheduler's microtasks, so the caller's continuation
/// has run by the time `flush` returns. Requests are answered in whatever
/// order the test flushes them.
///
/// Clones share the same outstanding set.
#[derive(Clone)]
pub struct MockTransport {
    state: Arc<Mutex<TransportState>>,
    scheduler: VirtualScheduler,
}

impl MockTransport {
    /// Creates a transport whose continuations run on `scheduler`.
    pub fn new(scheduler: &VirtualScheduler) -> Self {
        Self {
            state: Arc::new(Mutex::new(TransportState::default())),
            scheduler: scheduler.clone(),
        }
    }

    /// Outstanding requests in issue order.
    pub fn outstanding(&self) -> Vec<HttpRequest> {
        self.state
            .lock()
            .outstanding
            .values()
            .map(|p| p.request.clone())
            .collect()
    }

    /// Returns true while the request with `id` is unanswered.
    pub fn is_outstanding(&self, id: RequestId) -> bool {
        self.state.lock().outstanding.contains_key(&id)
    }

    /// All outstanding requests matching `matcher`, in issue order. Nothing
    /// is removed from the outstanding set.
    pub fn match_requests(&self, matcher: impl Into<RequestMatcher>) -> Vec<TestRequest> {
        let matcher = matcher.into();
        // The matcher may call back into the transport, so it runs unlocked.
        let outstanding: Vec<(RequestId, HttpRequest)> = self
            .state
            .lock()
            .outstanding
            .iter()
            .map(|(id, pending)| (*id, pending.request.clone()))
            .collect();
        outstanding
            .into_iter()
            .filter(|(_, request)| matcher.matches(request))
            .map(|(id, request)| TestRequest::new(id, request, self.clone()))
            .collect()
    }

    /// The single outstanding request matching `matcher`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::NoMatch`] if no request or more than one
    /// request matches.
    pub fn expect_one(
        &self,
        matcher: impl Into<RequestMatcher>,
    ) -> Result<TestRequest, TransportError> {
        let matcher = matcher.into();
        let mut matches = self.match_requests(matcher.clone());
        if matches.len() != 1 {
            let err = TransportError::NoMatch {
                matcher: matcher.to_string(),
                found: matches.len(),
                outstanding: self.outstanding_signatures(),
            };
            warn!(%err, "expect_one failed");
            return Err(err);
        }
        Ok(matches.remove(0))
    }

    /// Asserts that no outstanding request matches `matcher`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::UnexpectedMatch`] otherwise.
    pub fn expect_none(&self, matcher: impl Into<RequestMatcher>) -> Result<(), TransportError> {
        let matcher = matcher.into();
        let matches = self.match_requests(matcher.clone());
        if !matches.is_empty() {
            let err = TransportError::UnexpectedMatch {
                matcher: matcher.to_string(),
                matches: matches.iter().map(|m| m.request().signature()).collect(),
            };
            warn!(%err, "expect_none failed");
            return Err(err);
        }
        Ok(())
    }

    /// Answers `request` with `200 OK` and `body`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::UnknownRequest`] if the request was already
    /// answered or was recorded by a different transport.
    pub fn flush(&self, request: &TestRequest, body: Value) -> Result<(), TransportError> {
        self.settle(request, Ok(HttpResponse::ok(body)))
    }

    /// Fails `request` with the status, reason phrase and body in `spec`.
    pub fn flush_error(
        &self,
        request: &TestRequest,
        spec: ErrorSpec,
    ) -> Result<(), TransportError> {
        let error = HttpErrorResponse::from_spec(request.request().url_with_params(), spec);
        self.settle(request, Err(error))
    }

    /// Answers `request` with an explicit status. 2xx statuses succeed; any
    /// other status fails the request.
    pub fn respond(
        &self,
        request: &TestRequest,
        status: u16,
        status_text: &str,
        body: Value,
    ) -> Result<(), TransportError> {
        if is_success(status) {
            let response = HttpResponse {
                status,
                status_text: status_text.to_string(),
                body,
            };
            self.settle(request, Ok(response))
        } else {
            self.flush_error(request, ErrorSpec::new(status, status_text).with_body(body))
        }
    }

    /// Fails `request` with status 0, as a connection failure would.
    pub fn flush_network_error(
        &self,
        request: &TestRequest,
        message: &str,
    ) -> Result<(), TransportError> {
        self.flush_error(
            request,
            ErrorSpec::status(NETWORK_ERROR_STATUS).with_body(Value::String(message.to_string())),
        )
    }

    /// Checks that every recorded request was answered.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::UnsatisfiedRequests`] naming every request
    /// still outstanding.
    pub fn verify(&self) -> Result<(), TransportError> {
        let requests = self.outstanding_signatures();
        if requests.is_empty() {
            return Ok(());
        }
        let err = TransportError::UnsatisfiedRequests { requests };
        warn!(%err, "verify failed");
        Err(err)
    }

    fn outstanding_signatures(&self) -> Vec<String> {
        self.state
            .lock()
            .outstanding
            .values()
            .map(|p| p.request.signature())
            .collect()
    }

    fn settle(
        &self,
        request: &TestRequest,
        outcome: Result<HttpResponse, HttpErrorResponse>,
    ) -> Result<(), TransportError> {
        let unknown = || TransportError::UnknownRequest {
            id: request.id().value(),
            signature: request.request().signature(),
        };
        if !Arc::ptr_eq(&self.state, &request.transport().state) {
            return Err(unknown());
        }
        let pending = self
            .state
            .lock()
            .outstanding
            .remove(&request.id())
            .ok_or_else(unknown)?;

        match &outcome {
            Ok(response) => debug!(
                id = request.id().value(),
                status = response.status,
                request = %pending.request,
                "flushing request"
            ),
            Err(error) => debug!(
                id = request.id().value(),
                status = error.status,
                request = %pending.request,
                "failing request"
            ),
        }
        pending.response.settle(outcome);
        self.scheduler.drain_microtasks()?;
        Ok(())
    }
}

impl HttpBackend for MockTransport {
    fn send(&self, request: HttpRequest) -> ResponseHandle {
        let response = Promise::pending(&self.scheduler);
        let mut state = self.state.lock();
        let id = RequestId(state.next_id);
        state.next_id += 1;
        debug!(id = id.value(), request = %request, "request recorded");
        state.outstanding.insert(
            id,
            PendingRequest {
                request,
                response: response.clone(),
            },
        );
        response
    }

    fn scheduler(&self) -> &VirtualScheduler {
        &self.scheduler
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("outstanding", &self.outstanding_signatures())
            .finish()
    }
}

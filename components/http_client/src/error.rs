//! Errors raised by the mock transport when a test misuses it.

use async_runtime::SchedulerError;
use thiserror::Error;

/// Transport harness errors.
///
/// These indicate a broken test rather than a failed request, and each one
/// names the requests involved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Zero or several outstanding requests matched where exactly one was
    /// expected.
    #[error(
        "expected one matching request for criteria \"{matcher}\", found {found} \
         (outstanding: [{}])",
        .outstanding.join(", ")
    )]
    NoMatch {
        /// Description of the matcher
        matcher: String,
        /// Number of matching requests
        found: usize,
        /// Signatures of all outstanding requests
        outstanding: Vec<String>,
    },

    /// A request matched where none was expected.
    #[error(
        "expected zero matching requests for criteria \"{matcher}\", found {}: [{}]",
        .matches.len(),
        .matches.join(", ")
    )]
    UnexpectedMatch {
        /// Description of the matcher
        matcher: String,
        /// Signatures of the matching requests, in issue order
        matches: Vec<String>,
    },

    /// Requests were issued but never flushed.
    #[error(
        "expected no open requests, found {}: [{}]",
        .requests.len(),
        .requests.join(", ")
    )]
    UnsatisfiedRequests {
        /// Signatures of the open requests, in issue order
        requests: Vec<String>,
    },

    /// The request was already flushed or belongs to another transport.
    #[error("request #{id} ({signature}) is not outstanding on this transport")]
    UnknownRequest {
        /// Request id
        id: u64,
        /// Request signature
        signature: String,
    },

    /// Draining continuations after a flush failed.
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

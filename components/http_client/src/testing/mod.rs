//! In-memory transport for tests.
//!
//! - [`MockTransport`] - Records requests and settles them on demand
//! - [`RequestMatcher`] - Selects outstanding requests
//! - [`TestRequest`] - A matched request that can be flushed

mod matcher;
mod test_request;
mod transport;

pub use matcher::RequestMatcher;
pub use test_request::{RequestId, TestRequest};
pub use transport::MockTransport;

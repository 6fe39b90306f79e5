//! HTTP client plumbing.
//!
//! This crate provides the [`HttpBackend`] seam an API client is written
//! against, and an in-memory [`testing::MockTransport`] that records requests
//! so a test can assert on them and settle them in any order.
//!
//! # Examples
//!
//! ```
//! use async_runtime::VirtualScheduler;
//! use core_types::HttpRequest;
//! use http_client::testing::MockTransport;
//! use http_client::HttpBackend;
//! use serde_json::json;
//!
//! let scheduler = VirtualScheduler::new();
//! let transport = MockTransport::new(&scheduler);
//!
//! let response = transport.send(HttpRequest::get("/api/courses"));
//! let req = transport.expect_one("/api/courses").unwrap();
//! req.flush(json!({"payload": []})).unwrap();
//!
//! assert_eq!(response.result().unwrap().unwrap().body, json!({"payload": []}));
//! transport.verify().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod error;
pub mod testing;

pub use backend::{HttpBackend, ResponseHandle};
pub use error::TransportError;

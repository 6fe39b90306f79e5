//! Core HTTP-shaped value types.
//!
//! This crate provides the request and response values exchanged between an
//! API client and whatever backend settles its calls.
//!
//! # Overview
//!
//! - [`HttpMethod`] - Request method
//! - [`HttpParams`] - Ordered query parameters
//! - [`HttpRequest`] - An outgoing request
//! - [`HttpResponse`] - A successful response
//! - [`HttpErrorResponse`] - A failed response carrying status and message
//! - [`ErrorSpec`] - Status, reason phrase and body used to fail a request
//!
//! # Examples
//!
//! ```
//! use core_types::{HttpMethod, HttpParams, HttpRequest};
//!
//! let request = HttpRequest::get("/api/lessons")
//!     .with_params(HttpParams::new().set("courseId", 12).set("filter", ""));
//!
//! assert_eq!(request.method, HttpMethod::Get);
//! assert_eq!(request.params.get("courseId"), Some("12"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod request;
mod response;

pub use request::{HttpMethod, HttpParams, HttpRequest};
pub use response::{
    default_status_text, is_success, ErrorSpec, HttpErrorResponse, HttpResponse,
    NETWORK_ERROR_STATUS,
};

//! Contract compliance tests for core_types
//!
//! These tests pin the JSON shape of the error envelope and requests.

use core_types::{ErrorSpec, HttpErrorResponse, HttpMethod, HttpParams, HttpRequest};
use serde_json::json;

#[cfg(test)]
mod envelope_contract_tests {
    use super::*;

    /// Contract: error envelope exposes status, statusText and body
    #[test]
    fn test_error_envelope_fields() {
        let err = HttpErrorResponse::from_spec(
            "/api/courses/12",
            ErrorSpec::new(500, "Internal Server Error").with_body(json!("Save course failed")),
        );
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["status"], json!(500));
        assert_eq!(value["status_text"], json!("Internal Server Error"));
        assert_eq!(value["body"], json!("Save course failed"));
    }

    #[test]
    fn test_request_round_trips_through_json() {
        let request = HttpRequest::get("/api/lessons")
            .with_params(HttpParams::new().set("courseId", 12).set("sortOrder", "asc"));
        let text = serde_json::to_string(&request).unwrap();
        let back: HttpRequest = serde_json::from_str(&text).unwrap();
        assert_eq!(back, request);
        assert_eq!(back.method, HttpMethod::Get);
    }
}

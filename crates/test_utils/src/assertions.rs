//! Custom Test Assertions
//!
//! Assertion helpers for requests recorded by `MockTransport`.

use serde_json::Value;

use core_kernel::{ApiRequest, HttpMethod};

/// Asserts a request's method and rendered path
///
/// # Panics
///
/// Panics when the method differs or the path cannot be rendered or differs.
pub fn assert_request(request: &ApiRequest, method: HttpMethod, path: &str) {
    assert_eq!(request.method, method, "unexpected method for {}", request.path);
    let rendered = request
        .rendered_path()
        .unwrap_or_else(|e| panic!("path {} does not render: {}", request.path, e));
    assert_eq!(rendered, path, "unexpected path");
}

/// Asserts a request carries exactly `expected` as its JSON body
pub fn assert_json_body(request: &ApiRequest, expected: &Value) {
    match &request.body {
        Some(body) => assert_eq!(body, expected, "unexpected body for {}", request.path),
        None => panic!("request to {} has no body", request.path),
    }
}

/// Asserts a query parameter is present with `value`
pub fn assert_query(request: &ApiRequest, name: &str, value: &str) {
    let found = request
        .query
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str());
    assert_eq!(found, Some(value), "query parameter {} of {}", name, request.path);
}

/// Asserts a query parameter is absent
pub fn assert_no_query(request: &ApiRequest, name: &str) {
    assert!(
        request.query.iter().all(|(n, _)| n != name),
        "query parameter {} unexpectedly set on {}",
        name,
        request.path
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_assertions() {
        let request = ApiRequest::get("/deals/v1/deal/:deal_id")
            .path_param("deal_id", 7)
            .query("limit", 10);
        assert_request(&request, HttpMethod::Get, "/deals/v1/deal/7");
        assert_query(&request, "limit", "10");
        assert_no_query(&request, "offset");
    }

    #[test]
    #[should_panic(expected = "has no body")]
    fn test_missing_body_panics() {
        let request = ApiRequest::get("/x");
        assert_json_body(&request, &json!({}));
    }
}

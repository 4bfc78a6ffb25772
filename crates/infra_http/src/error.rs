//! HTTP error translation
//!
//! Maps HTTP statuses and reqwest failures onto `PortError`, keeping the
//! original status and response body:
//! - 404 -> `PortError::NotFound`
//! - 401/403 -> `PortError::Unauthorized`
//! - 429 -> `PortError::RateLimited`
//! - any other non-2xx -> `PortError::Http`
//! - timeouts -> `PortError::Timeout`
//! - connect failures -> `PortError::Connection`

use std::time::Duration;

use serde_json::Value;

use core_kernel::{PortError, ResponseMode};

/// Translates a non-success status into a `PortError`
///
/// # Arguments
///
/// * `status` - The HTTP status code
/// * `path` - The rendered request path, for context
/// * `body` - The response body text
/// * `retry_after_secs` - Parsed `Retry-After` header, if any
pub fn status_to_port_error(
    status: u16,
    path: &str,
    body: String,
    retry_after_secs: Option<u64>,
) -> PortError {
    match status {
        404 => PortError::not_found(path, body),
        401 | 403 => PortError::Unauthorized {
            status,
            message: body,
        },
        429 => PortError::RateLimited {
            retry_after_secs: retry_after_secs.unwrap_or(0),
        },
        _ => PortError::http(status, body),
    }
}

/// Translates a reqwest failure into a `PortError`
pub fn client_error(err: reqwest::Error, operation: &str, timeout: Option<Duration>) -> PortError {
    if err.is_timeout() {
        PortError::Timeout {
            operation: operation.to_string(),
            duration_ms: timeout.map(|t| t.as_millis() as u64).unwrap_or(0),
        }
    } else if err.is_connect() || err.is_request() {
        PortError::Connection {
            message: format!("{} failed: {}", operation, err),
            source: Some(Box::new(err)),
        }
    } else if err.is_decode() || err.is_body() {
        PortError::transformation(format!("{} returned an unreadable body: {}", operation, err))
    } else {
        PortError::Internal {
            message: format!("{} failed: {}", operation, err),
            source: Some(Box::new(err)),
        }
    }
}

/// Decodes a successful response body according to the response mode
pub fn parse_body(body: &str, mode: ResponseMode) -> Result<Value, PortError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    match mode {
        ResponseMode::Json => serde_json::from_str(body)
            .map_err(|e| PortError::transformation(format!("Invalid JSON response: {}", e))),
        ResponseMode::Raw => Ok(serde_json::from_str(body)
            .unwrap_or_else(|_| Value::String(body.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_mapping() {
        assert!(status_to_port_error(404, "/x", String::new(), None).is_not_found());
        assert!(matches!(
            status_to_port_error(403, "/x", "scopes".into(), None),
            PortError::Unauthorized { status: 403, .. }
        ));
        assert!(matches!(
            status_to_port_error(429, "/x", String::new(), Some(10)),
            PortError::RateLimited { retry_after_secs: 10 }
        ));
        match status_to_port_error(500, "/x", "boom".into(), None) {
            PortError::Http { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("Expected Http, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_body_is_null() {
        assert_eq!(parse_body("", ResponseMode::Json).unwrap(), Value::Null);
        assert_eq!(parse_body("  ", ResponseMode::Raw).unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_json_modes() {
        assert_eq!(parse_body("{\"a\":1}", ResponseMode::Json).unwrap(), json!({"a": 1}));
        assert!(parse_body("not json", ResponseMode::Json).is_err());
        assert_eq!(
            parse_body("not json", ResponseMode::Raw).unwrap(),
            Value::String("not json".to_string())
        );
    }
}

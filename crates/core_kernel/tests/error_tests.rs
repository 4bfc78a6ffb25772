//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::ports::PortError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("'hapikey' not configured");

    match error {
        CoreError::Configuration(msg) => assert!(msg.contains("hapikey")),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_missing_path_param_display() {
    let error = CoreError::missing_path_param("deal_id", "/deals/v1/deal/:deal_id");
    let display = format!("{}", error);

    assert!(display.contains("deal_id"));
    assert!(display.contains("/deals/v1/deal/:deal_id"));
}

#[test]
fn test_port_error_from_core_error() {
    let port_error: PortError = CoreError::validation("bad path").into();

    assert!(matches!(port_error, PortError::Validation { .. }));
}

#[test]
fn test_port_error_display_keeps_status_and_message() {
    let error = PortError::http(400, "{\"message\":\"invalid definitionId\"}");
    let display = error.to_string();

    assert!(display.contains("400"));
    assert!(display.contains("invalid definitionId"));
}

#[test]
fn test_unauthorized_keeps_status() {
    let error = PortError::Unauthorized {
        status: 403,
        message: "missing scopes".to_string(),
    };

    assert_eq!(error.status_code(), Some(403));
    assert!(!error.is_not_found());
}

//! Tests for gateway error display and classification

use super::ApiError;
use reqwest::StatusCode;

#[test]
fn test_request_error_includes_status() {
    let err = ApiError::Request {
        status: StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = err.to_string();
    assert!(message.contains("500"), "got: {message}");
}

#[test]
fn test_validation_error_joins_messages() {
    let err = ApiError::Validation {
        messages: vec![
            "Thesis is required".to_string(),
            "At least one tag is required".to_string(),
        ],
    };
    let message = err.to_string();
    assert!(message.contains("Thesis is required"));
    assert!(message.contains("; "));
}

#[test]
fn test_not_found_names_the_slug() {
    let err = ApiError::NotFound {
        slug: "unknown-slug".to_string(),
    };
    assert!(err.to_string().contains("unknown-slug"));
    assert!(err.is_not_found());
}

#[test]
fn test_only_not_found_is_not_found() {
    let err = ApiError::Request {
        status: StatusCode::BAD_GATEWAY,
    };
    assert!(!err.is_not_found());

    let err = ApiError::Decode("missing field `data`".to_string());
    assert!(!err.is_not_found());
}

#[test]
fn test_decode_error_carries_detail() {
    let err = ApiError::Decode("invalid type: null, expected a string".to_string());
    assert!(err.to_string().contains("expected a string"));
}

//! Tests for the domain error payload and its serde contract.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(DomainError::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(DomainError::duplicate_email("taken"), ErrorCode::DuplicateEmail)]
#[case(DomainError::conflict("again"), ErrorCode::Conflict)]
#[case(DomainError::not_found("gone"), ErrorCode::NotFound)]
#[case(DomainError::invalid_credentials("nope"), ErrorCode::InvalidCredentials)]
#[case(DomainError::expired_token("late"), ErrorCode::ExpiredToken)]
#[case(DomainError::malformed_token("junk"), ErrorCode::MalformedToken)]
#[case(DomainError::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(DomainError::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_empty_message() {
    let _ = DomainError::new(ErrorCode::InternalError, "");
}

#[rstest]
fn serializes_code_in_snake_case() {
    let error = DomainError::duplicate_email("email already registered")
        .with_details(json!({ "field": "email" }));

    let value = serde_json::to_value(&error).expect("serialize error");

    assert_eq!(
        value,
        json!({
            "code": "duplicate_email",
            "message": "email already registered",
            "details": { "field": "email" },
        })
    );
}

#[rstest]
fn omits_absent_details() {
    let value = serde_json::to_value(DomainError::not_found("event not found")).expect("serialize");
    assert!(value.get("details").is_none());
}

#[rstest]
fn deserialization_rejects_blank_messages() {
    let payload = json!({ "code": "conflict", "message": "  " });
    let result = serde_json::from_value::<DomainError>(payload);
    assert!(result.is_err());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(DomainError::conflict("already attending").to_string(), "already attending");
}

#[rstest]
fn deserialization_rejects_unknown_fields() {
    let payload = json!({ "code": "not_found", "message": "gone", "trace": "abc" });
    assert!(serde_json::from_value::<DomainError>(payload).is_err());
}

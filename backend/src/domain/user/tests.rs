//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn alice() -> User {
    User::try_from_parts(1, "alice@x.com", "Alice").expect("valid user")
}

#[rstest]
#[case(0)]
#[case(-7)]
fn user_id_rejects_non_positive_values(#[case] raw: i64) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::NonPositiveId));
}

#[rstest]
#[case("alice@x.com")]
#[case("first.last+tag@sub.example.org")]
#[case("  padded@example.com  ")]
fn email_accepts_valid_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), raw.trim());
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("alice", UserValidationError::InvalidEmail)]
#[case("alice@", UserValidationError::InvalidEmail)]
#[case("alice@localhost", UserValidationError::InvalidEmail)]
#[case("al ice@x.com", UserValidationError::InvalidEmail)]
#[case("a@b@x.com", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_addresses(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn email_rejects_overlong_addresses() {
    let raw = format!("{}@x.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
fn email_preserves_case() {
    let email = EmailAddress::new("Alice@X.com").expect("valid email");
    assert_ne!(email, EmailAddress::new("alice@x.com").expect("valid email"));
}

#[rstest]
#[case("", UserValidationError::EmptyDisplayName)]
#[case("A", UserValidationError::DisplayNameTooShort { min: DISPLAY_NAME_MIN })]
#[case("é", UserValidationError::DisplayNameTooShort { min: DISPLAY_NAME_MIN })]
fn display_name_rejects_short_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw), Err(expected));
}

#[rstest]
#[case(" B ")]
#[case("Al")]
#[case(&"a".repeat(500))]
fn display_name_keeps_input_verbatim(#[case] raw: &str) {
    let name = DisplayName::new(raw).expect("valid name");
    assert_eq!(name.as_ref(), raw);
}

#[rstest]
fn user_serializes_without_secret(alice: User) {
    let value = serde_json::to_value(&alice).expect("serialize user");
    assert_eq!(
        value,
        json!({ "id": 1, "email": "alice@x.com", "name": "Alice" })
    );
}

#[rstest]
fn user_deserialization_validates_fields() {
    let payload = json!({ "id": 1, "email": "not-an-email", "name": "Alice" });
    assert!(serde_json::from_value::<User>(payload).is_err());
}

#[rstest]
fn user_deserialization_rejects_password_field() {
    let payload = json!({
        "id": 1,
        "email": "alice@x.com",
        "name": "Alice",
        "password": "secret1",
    });
    assert!(serde_json::from_value::<User>(payload).is_err());
}

#[rstest]
fn record_debug_redacts_password_hash(alice: User) {
    let record = UserRecord::new(alice, PasswordHash::new("$2b$04$abcdefghijklmnopqrstuv"));
    let rendered = format!("{record:?}");
    assert!(!rendered.contains("abcdefghijklmnopqrstuv"));
    assert_eq!(record.into_user().id().get(), 1);
}

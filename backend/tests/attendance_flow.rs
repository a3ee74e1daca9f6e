//! End-to-end identity and attendance behaviour over the in-memory adapters.

use events_core::domain::{
    DomainError, ErrorCode, EventId, LoginCredentials, RegistrationRequest, UserId,
};
use rstest::rstest;

mod support;

use support::services_with_events;

fn registration(email: &str, name: &str, password: &str) -> RegistrationRequest {
    RegistrationRequest::try_from_parts(email, name, password).expect("valid registration")
}

fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("valid credentials")
}

fn event_id(id: i64) -> EventId {
    EventId::new(id).expect("event id")
}

#[rstest]
#[tokio::test]
async fn register_login_attend_and_leave() {
    let (services, _store) = services_with_events(&[10]);

    let alice = services
        .identity
        .register(&registration("alice@x.com", "Alice", "secret1"))
        .await
        .expect("register alice");
    assert_eq!(alice.id().get(), 1);

    let token = services
        .identity
        .login(&credentials("alice@x.com", "secret1"))
        .await
        .expect("login");
    let subject = services
        .authenticator
        .authenticate(token.as_str())
        .expect("authenticate");
    assert_eq!(subject, alice.id());

    let membership = services
        .attendees
        .add_attendee(event_id(10), subject)
        .await
        .expect("add attendee");
    assert!(membership.matches(event_id(10), subject));

    let duplicate = services
        .attendees
        .add_attendee(event_id(10), subject)
        .await
        .expect_err("duplicate add");
    assert_eq!(duplicate.code(), ErrorCode::Conflict);

    let attendees = services
        .attendance
        .list_attendees(event_id(10))
        .await
        .expect("list");
    assert_eq!(attendees, vec![alice.clone()]);

    services
        .attendees
        .remove_attendee(event_id(10), subject)
        .await
        .expect("remove");
    services
        .attendees
        .remove_attendee(event_id(10), subject)
        .await
        .expect("second remove is a no-op");

    let attendees = services
        .attendance
        .list_attendees(event_id(10))
        .await
        .expect("list");
    assert!(attendees.is_empty());
}

#[rstest]
#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (services, _store) = services_with_events(&[]);
    services
        .identity
        .register(&registration("alice@x.com", "Alice", "secret1"))
        .await
        .expect("first registration");

    let err = services
        .identity
        .register(&registration("alice@x.com", "Another Alice", "secret2"))
        .await
        .expect_err("second registration");

    assert_eq!(err.code(), ErrorCode::DuplicateEmail);
}

#[rstest]
#[tokio::test]
async fn failed_logins_look_the_same() {
    let (services, _store) = services_with_events(&[]);
    services
        .identity
        .register(&registration("alice@x.com", "Alice", "secret1"))
        .await
        .expect("register");

    let wrong_password = services
        .identity
        .login(&credentials("alice@x.com", "wrong-password"))
        .await
        .expect_err("wrong password");
    let unknown_email = services
        .identity
        .login(&credentials("nobody@x.com", "secret1"))
        .await
        .expect_err("unknown email");

    assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
    assert_eq!(wrong_password, unknown_email);
}

#[rstest]
#[tokio::test]
async fn missing_event_or_user_is_not_found() {
    let (services, _store) = services_with_events(&[10]);
    let alice = services
        .identity
        .register(&registration("alice@x.com", "Alice", "secret1"))
        .await
        .expect("register");

    let no_event = services
        .attendees
        .add_attendee(event_id(11), alice.id())
        .await
        .expect_err("missing event");
    let no_user = services
        .attendees
        .add_attendee(event_id(10), UserId::new(42).expect("user id"))
        .await
        .expect_err("missing user");

    assert_eq!(no_event.code(), ErrorCode::NotFound);
    assert_eq!(no_user.code(), ErrorCode::NotFound);
    assert!(
        services
            .attendance
            .list_attendees(event_id(10))
            .await
            .expect("list")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn events_for_attendee_are_ordered() {
    let (services, _store) = services_with_events(&[30, 10, 20]);
    let bob = services
        .identity
        .register(&registration("bob@x.com", "Bob", "secret1"))
        .await
        .expect("register");

    for id in [30, 10] {
        services
            .attendees
            .add_attendee(event_id(id), bob.id())
            .await
            .expect("add");
    }

    let events = services
        .attendance
        .list_events_for_attendee(bob.id())
        .await
        .expect("list");
    let attendance = services
        .attendance
        .attendance(event_id(20), bob.id())
        .await
        .expect("attendance");

    assert_eq!(
        events.iter().map(|event| event.id.get()).collect::<Vec<_>>(),
        vec![10, 30]
    );
    assert_eq!(attendance, None);
}

#[rstest]
#[tokio::test]
async fn profile_lookup_hides_nothing_but_the_secret() {
    let (services, _store) = services_with_events(&[]);
    let alice = services
        .identity
        .register(&registration("alice@x.com", "Alice", "secret1"))
        .await
        .expect("register");

    let fetched = services.profiles.get_user(alice.id()).await.expect("get");
    let missing = services
        .profiles
        .get_user(UserId::new(99).expect("user id"))
        .await
        .expect_err("missing");

    assert_eq!(fetched, alice);
    assert!(
        !serde_json::to_string(&fetched)
            .expect("serialize")
            .contains("secret1")
    );
    assert_eq!(missing.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn passwords_differing_past_seventy_two_bytes_never_collide() {
    let (services, _store) = services_with_events(&[]);
    let prefix = "a".repeat(72);

    let too_long = RegistrationRequest::try_from_parts(
        "alice@x.com",
        "Alice",
        &format!("{prefix}REAL-SUFFIX"),
    )
    .expect_err("over-long password");
    assert_eq!(
        DomainError::from(too_long).code(),
        ErrorCode::InvalidRequest
    );

    services
        .identity
        .register(&registration("alice@x.com", "Alice", &prefix))
        .await
        .expect("register at the limit");
    let err = services
        .identity
        .login(&credentials("alice@x.com", &format!("{prefix}WRONG")))
        .await
        .expect_err("suffix must not be ignored");

    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
}

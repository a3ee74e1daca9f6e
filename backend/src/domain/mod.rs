//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed domain entities and the use-case services
//! that enforce identity and attendance invariants. Keep types immutable and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - DomainError (alias `Error`) / ErrorCode: transport-agnostic failure payload.
//! - User, UserRecord, NewUser: user identity with and without its secret.
//! - Event, Membership: the attendance relation.
//! - IdentityService: registration, login, and token authentication.
//! - MembershipService: adding, removing, and listing attendees.

pub mod auth;
pub mod error;
pub mod event;
pub mod identity_service;
pub mod membership;
pub mod membership_service;
pub mod ports;
mod storage_errors;
pub mod user;

pub use self::auth::{
    AuthToken, LoginCredentials, LoginValidationError, PASSWORD_MAX_BYTES, PASSWORD_MIN,
    PasswordHash, RegistrationRequest, RegistrationValidationError,
};
pub use self::error::{DomainError, DomainError as Error, DomainErrorValidationError, ErrorCode};
pub use self::event::{Event, EventId, NonPositiveEventId};
pub use self::identity_service::IdentityService;
pub use self::membership::{Membership, MembershipId};
pub use self::membership_service::MembershipService;
pub use self::user::{
    DisplayName, EmailAddress, NewUser, User, UserId, UserRecord, UserValidationError,
};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use events_core::domain::{DomainError, DomainResult};
///
/// fn lookup() -> DomainResult<()> {
///     Err(DomainError::not_found("event not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;

//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call it with already validated payloads and never see
//! password hashes or signing keys.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginCredentials, RegistrationRequest, User};

/// Domain use-case port for account creation and authentication.
#[async_trait]
pub trait IdentityCommand: Send + Sync {
    /// Create a user, storing only a hash of the password.
    ///
    /// Fails with `DuplicateEmail` when the email is already registered.
    async fn register(&self, request: &RegistrationRequest) -> Result<User, Error>;

    /// Exchange credentials for a bearer token.
    ///
    /// Unknown emails and wrong passwords both fail with the same
    /// `InvalidCredentials` error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error>;
}

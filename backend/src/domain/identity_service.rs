//! Registration, login, and bearer-token authentication.
//!
//! This module implements the identity driving ports on top of the user
//! directory, credential store, and token issuer ports. Password hashing is
//! CPU-bound, so it runs on Tokio's blocking pool and scales with concurrent
//! registrations instead of stalling the async executor.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    CredentialStore, CredentialStoreError, IdentityCommand, TokenAuthenticator, TokenError,
    TokenIssuer, UserDirectory, UserProfileQuery,
};
use crate::domain::{
    AuthToken, Error, LoginCredentials, NewUser, PasswordHash, RegistrationRequest, User, UserId,
};

use super::storage_errors::map_user_directory_error;

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Identity service implementing the registration, login, and
/// authentication driving ports.
#[derive(Clone)]
pub struct IdentityService<U, C, T> {
    users: Arc<U>,
    credentials: Arc<C>,
    tokens: Arc<T>,
}

impl<U, C, T> IdentityService<U, C, T> {
    /// Create a new service over the given ports.
    pub fn new(users: Arc<U>, credentials: Arc<C>, tokens: Arc<T>) -> Self {
        Self {
            users,
            credentials,
            tokens,
        }
    }
}

fn map_credential_error(error: CredentialStoreError) -> Error {
    match error {
        CredentialStoreError::WeakInput => Error::invalid_request("password must not be empty"),
        CredentialStoreError::TooLong { max } => {
            Error::invalid_request(format!("password must be at most {max} bytes"))
        }
        CredentialStoreError::InvalidCost { .. } | CredentialStoreError::Hashing { .. } => {
            warn!(error = %error, "password hashing failed");
            Error::internal("failed to process password")
        }
    }
}

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Expired => Error::expired_token("token has expired"),
        TokenError::Malformed { .. } => Error::malformed_token("token is malformed"),
        TokenError::Signing { message } => {
            warn!(%message, "token signing failed");
            Error::internal("failed to issue token")
        }
    }
}

impl<U, C, T> IdentityService<U, C, T>
where
    U: UserDirectory,
    C: CredentialStore + 'static,
    T: TokenIssuer,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let credentials = Arc::clone(&self.credentials);
        let plaintext = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || credentials.hash(&plaintext))
            .await
            .map_err(|err| {
                warn!(error = %err, "password hashing task failed");
                Error::internal("failed to process password")
            })?
            .map_err(map_credential_error)
    }

    /// Verify against the stored secret, or against the decoy when the user
    /// is unknown, so both paths cost one full verification.
    async fn verify_password(
        &self,
        password: &str,
        secret: Option<PasswordHash>,
    ) -> Result<bool, Error> {
        let credentials = Arc::clone(&self.credentials);
        let plaintext = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || match secret {
            Some(secret) => credentials.verify(&plaintext, &secret),
            None => credentials.verify_decoy(&plaintext),
        })
        .await
        .map_err(|err| {
            warn!(error = %err, "password verification task failed");
            Error::internal("failed to process password")
        })
    }
}

#[async_trait]
impl<U, C, T> IdentityCommand for IdentityService<U, C, T>
where
    U: UserDirectory,
    C: CredentialStore + 'static,
    T: TokenIssuer,
{
    async fn register(&self, request: &RegistrationRequest) -> Result<User, Error> {
        // Early answer only; the unique index decides races below.
        let existing = self
            .users
            .find_by_email(request.email())
            .await
            .map_err(map_user_directory_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_email("a user with this email already exists"));
        }

        let password_hash = self.hash_password(request.password()).await?;
        let new_user = NewUser {
            email: request.email().clone(),
            name: request.name().clone(),
            password_hash,
        };

        let user = self
            .users
            .insert(&new_user)
            .await
            .map_err(map_user_directory_error)?;
        info!(user_id = %user.id(), "registered user");
        Ok(user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthToken, Error> {
        let record = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_directory_error)?;

        let (user_id, secret) = match record {
            Some(record) => (
                Some(record.user().id()),
                Some(record.password_hash().clone()),
            ),
            None => (None, None),
        };
        let verified = self.verify_password(credentials.password(), secret).await?;

        match user_id {
            Some(user_id) if verified => {
                let token = self.tokens.issue(user_id).map_err(map_token_error)?;
                info!(%user_id, "issued bearer token");
                Ok(token)
            }
            _ => {
                warn!("rejected login attempt");
                Err(Error::invalid_credentials(INVALID_CREDENTIALS))
            }
        }
    }
}

impl<U, C, T> TokenAuthenticator for IdentityService<U, C, T>
where
    U: Send + Sync,
    C: Send + Sync,
    T: TokenIssuer,
{
    fn authenticate(&self, token: &str) -> Result<UserId, Error> {
        self.tokens.verify(token).map_err(map_token_error)
    }
}

#[async_trait]
impl<U, C, T> UserProfileQuery for IdentityService<U, C, T>
where
    U: UserDirectory,
    C: Send + Sync,
    T: Send + Sync,
{
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

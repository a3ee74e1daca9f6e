//! Authentication primitives such as login credentials and bearer tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde_json::json;
use zeroize::Zeroizing;

use super::{DisplayName, EmailAddress, Error, UserValidationError};

/// Minimum password length, in characters, accepted at registration.
pub const PASSWORD_MIN: usize = 6;

/// Maximum password length, in bytes. bcrypt ignores anything past this.
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or not an address.
    Email(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => fmt::Display::fmt(err, f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        let field = match value {
            LoginValidationError::Email(_) => "email",
            LoginValidationError::EmptyPassword => "password",
        };
        Self::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is a syntactically valid address.
/// - `password` is non-empty and retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use events_core::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice@x.com", "secret1")
///     .expect("valid credentials");
/// assert_eq!(creds.email().as_ref(), "alice@x.com");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::Email)?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look the user up.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validation failures for registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Email was missing or not an address.
    Email(UserValidationError),
    /// Name was empty or too short.
    Name(UserValidationError),
    /// Password shorter than [`PASSWORD_MIN`] characters.
    PasswordTooShort { min: usize },
    /// Password longer than [`PASSWORD_MAX_BYTES`] bytes.
    PasswordTooLong { max: usize },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) | Self::Name(err) => fmt::Display::fmt(err, f),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} bytes")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<RegistrationValidationError> for Error {
    fn from(value: RegistrationValidationError) -> Self {
        let field = match value {
            RegistrationValidationError::Email(_) => "email",
            RegistrationValidationError::Name(_) => "name",
            RegistrationValidationError::PasswordTooShort { .. }
            | RegistrationValidationError::PasswordTooLong { .. } => "password",
        };
        Self::invalid_request(value.to_string()).with_details(json!({ "field": field }))
    }
}

/// Validated registration input.
///
/// # Examples
/// ```
/// use events_core::domain::RegistrationRequest;
///
/// let request = RegistrationRequest::try_from_parts("alice@x.com", "Alice", "secret1")
///     .expect("valid registration");
/// assert_eq!(request.name().as_ref(), "Alice");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    email: EmailAddress,
    name: DisplayName,
    password: Zeroizing<String>,
}

impl RegistrationRequest {
    /// Validate raw registration fields: email syntax, a name of at least two
    /// characters, and a password of at least [`PASSWORD_MIN`] characters
    /// and at most [`PASSWORD_MAX_BYTES`] bytes.
    pub fn try_from_parts(
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = EmailAddress::new(email).map_err(RegistrationValidationError::Email)?;
        let name = DisplayName::new(name).map_err(RegistrationValidationError::Name)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if password.len() > PASSWORD_MAX_BYTES {
            return Err(RegistrationValidationError::PasswordTooLong {
                max: PASSWORD_MAX_BYTES,
            });
        }

        Ok(Self {
            email,
            name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email to register.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name to register.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Plaintext password, hashed before storage.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Stored password secret produced by a credential store.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded secret as read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded secret for persistence adapters.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Signed bearer token handed to a caller after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string for the `Authorization: Bearer` header.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

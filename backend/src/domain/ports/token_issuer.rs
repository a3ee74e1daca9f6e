//! Port for issuing and validating bearer tokens.

use crate::domain::{AuthToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while issuing or validating tokens.
    pub enum TokenError {
        /// Structurally invalid, wrongly signed, or carrying unusable claims.
        Malformed { message: String } => "token is malformed: {message}",
        /// Signature is valid but the expiry has passed.
        Expired => "token has expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Signed, self-contained bearer tokens bound to a user id.
///
/// Implementations hold only immutable key material and may be shared across
/// any number of concurrent callers.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token for `subject` that expires after the policy lifetime.
    fn issue(&self, subject: UserId) -> Result<AuthToken, TokenError>;

    /// Verify the signature, then the expiry, and return the subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

//! Driving port used to gate protected operations on a bearer token.

use crate::domain::{Error, UserId};

/// Resolve a bearer token to the user it was issued for.
pub trait TokenAuthenticator: Send + Sync {
    /// Fails with `ExpiredToken` or `MalformedToken`.
    fn authenticate(&self, token: &str) -> Result<UserId, Error>;
}

//! HS256 JWT implementation of the `TokenIssuer` port.
//!
//! Tokens carry `{sub, iat, exp}` only. Signatures are checked by
//! `jsonwebtoken`; expiry is checked afterwards against the injected clock
//! with zero leeway, so tests can move time without sleeping.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AuthToken, UserId};

/// Lifetime of an issued token.
pub const TOKEN_TTL: Duration = Duration::hours(72);

/// Keys shorter than this are accepted with a warning.
const RECOMMENDED_KEY_LEN: usize = 32;

/// Error returned when a signing key is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("signing key must not be empty")]
pub struct EmptySigningKey;

/// HMAC secret used to sign and verify tokens.
///
/// Zeroized on drop; `Debug` never prints the bytes.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Wrap raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySigningKey`] when `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, EmptySigningKey> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.is_empty() {
            return Err(EmptySigningKey);
        }
        if bytes.len() < RECOMMENDED_KEY_LEN {
            warn!(
                length = bytes.len(),
                recommended = RECOMMENDED_KEY_LEN,
                "token signing key is shorter than recommended"
            );
        }
        Ok(Self(bytes))
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Stateless HS256 token issuer.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("algorithm", &Algorithm::HS256)
            .finish_non_exhaustive()
    }
}

impl JwtTokenIssuer {
    /// Create an issuer signing with `key` and reading time from `clock`.
    pub fn new(key: &SigningKey, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            validation,
            clock,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: UserId) -> Result<AuthToken, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: subject.get().to_string(),
            iat: now.timestamp(),
            exp: (now + TOKEN_TTL).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AuthToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        let claims = data.claims;

        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }

        claims
            .sub
            .parse::<i64>()
            .ok()
            .and_then(|raw| UserId::new(raw).ok())
            .ok_or_else(|| TokenError::malformed("subject is not a user id"))
    }
}

//! Password hashing and bearer-token adapters.

mod bcrypt_credential_store;
mod jwt_token_issuer;

pub use bcrypt_credential_store::{BcryptCredentialStore, DEFAULT_COST};
pub use jwt_token_issuer::{EmptySigningKey, JwtTokenIssuer, SigningKey, TOKEN_TTL};

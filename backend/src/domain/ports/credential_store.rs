//! Port for turning passwords into stored secrets and checking them.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Plaintext was empty.
        WeakInput => "password must not be empty",
        /// Plaintext is longer than the hashing primitive can use.
        TooLong { max: usize } => "password must be at most {max} bytes",
        /// Configured work factor is outside the supported range.
        InvalidCost { cost: u32 } => "work factor {cost} is outside the supported range",
        /// The hashing primitive failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Slow, salted one-way password hashing.
///
/// Implementations are pure and CPU-bound. Async callers should run them on a
/// blocking thread. Neither plaintext nor secrets may appear in logs or error
/// messages.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Hash a plaintext password with a fresh salt. Input the primitive would
    /// truncate is rejected rather than silently shortened.
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialStoreError>;

    /// Check a plaintext password against a stored secret. Mismatches,
    /// over-long input, and unreadable secrets all return `false`.
    fn verify(&self, plaintext: &str, secret: &PasswordHash) -> bool;

    /// Spend the same effort as [`CredentialStore::verify`] against a decoy
    /// secret. Always returns `false`.
    fn verify_decoy(&self, plaintext: &str) -> bool;
}

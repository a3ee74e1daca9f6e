//! bcrypt-backed `CredentialStore`.
//!
//! Hashing and verification block the calling thread for the whole work
//! factor. Callers on an async runtime should go through
//! `tokio::task::spawn_blocking`.

use tracing::debug;

use crate::domain::{PASSWORD_MAX_BYTES, PasswordHash};
use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 12;

const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;
const DECOY_PLAINTEXT: &str = "decoy-password-for-unknown-accounts";

/// Credential store producing salted bcrypt hashes.
#[derive(Clone)]
pub struct BcryptCredentialStore {
    cost: u32,
    decoy: PasswordHash,
}

impl std::fmt::Debug for BcryptCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BcryptCredentialStore")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

impl BcryptCredentialStore {
    /// Build a store with the given work factor.
    ///
    /// Computes one hash up front for [`CredentialStore::verify_decoy`], so
    /// construction costs as much as a registration.
    ///
    /// # Errors
    ///
    /// `InvalidCost` when `cost` is outside `4..=31`; `Hashing` when the decoy
    /// hash cannot be produced.
    pub fn new(cost: u32) -> Result<Self, CredentialStoreError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CredentialStoreError::invalid_cost(cost));
        }
        let decoy = bcrypt::hash(DECOY_PLAINTEXT, cost)
            .map(PasswordHash::new)
            .map_err(|err| CredentialStoreError::hashing(err.to_string()))?;
        Ok(Self { cost, decoy })
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl CredentialStore for BcryptCredentialStore {
    fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialStoreError> {
        if plaintext.is_empty() {
            return Err(CredentialStoreError::weak_input());
        }
        if plaintext.len() > PASSWORD_MAX_BYTES {
            return Err(CredentialStoreError::too_long(PASSWORD_MAX_BYTES));
        }
        bcrypt::hash(plaintext, self.cost)
            .map(PasswordHash::new)
            .map_err(|err| CredentialStoreError::hashing(err.to_string()))
    }

    fn verify(&self, plaintext: &str, secret: &PasswordHash) -> bool {
        // bcrypt would compare only the first 72 bytes.
        if plaintext.len() > PASSWORD_MAX_BYTES {
            return false;
        }
        match bcrypt::verify(plaintext, secret.expose()) {
            Ok(matches) => matches,
            Err(err) => {
                debug!(error = %err, "stored password hash could not be verified");
                false
            }
        }
    }

    fn verify_decoy(&self, plaintext: &str) -> bool {
        if let Err(err) = bcrypt::verify(plaintext, self.decoy.expose()) {
            debug!(error = %err, "decoy verification failed");
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> BcryptCredentialStore {
        BcryptCredentialStore::new(MIN_COST).expect("valid cost")
    }

    #[rstest]
    fn hash_then_verify_accepts_original(store: BcryptCredentialStore) {
        let secret = store.hash("secret1").expect("hash");

        assert!(store.verify("secret1", &secret));
        assert!(!store.verify("secret2", &secret));
    }

    #[rstest]
    fn hashes_are_salted(store: BcryptCredentialStore) {
        let first = store.hash("secret1").expect("hash");
        let second = store.hash("secret1").expect("hash");

        assert_ne!(first, second);
        assert_ne!(first.expose(), "secret1");
    }

    #[rstest]
    fn empty_plaintext_is_weak_input(store: BcryptCredentialStore) {
        assert_eq!(store.hash(""), Err(CredentialStoreError::WeakInput));
    }

    #[rstest]
    fn input_past_the_bcrypt_limit_is_refused(store: BcryptCredentialStore) {
        let at_limit = "a".repeat(PASSWORD_MAX_BYTES);
        let secret = store.hash(&at_limit).expect("hash at limit");

        assert_eq!(
            store.hash(&format!("{at_limit}REAL-SUFFIX")),
            Err(CredentialStoreError::too_long(PASSWORD_MAX_BYTES))
        );
        assert!(store.verify(&at_limit, &secret));
        assert!(!store.verify(&format!("{at_limit}WRONG"), &secret));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-bcrypt-hash")]
    #[case("$2b$04$short")]
    fn malformed_stored_hash_never_verifies(store: BcryptCredentialStore, #[case] stored: &str) {
        assert!(!store.verify("secret1", &PasswordHash::new(stored)));
    }

    #[rstest]
    #[case(DECOY_PLAINTEXT)]
    #[case("secret1")]
    fn decoy_always_rejects(store: BcryptCredentialStore, #[case] plaintext: &str) {
        assert!(!store.verify_decoy(plaintext));
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(32)]
    fn out_of_range_cost_is_rejected(#[case] cost: u32) {
        assert_eq!(
            BcryptCredentialStore::new(cost).map(|store| store.cost()),
            Err(CredentialStoreError::invalid_cost(cost))
        );
    }

    #[rstest]
    fn debug_omits_decoy(store: BcryptCredentialStore) {
        let rendered = format!("{store:?}");
        assert!(rendered.contains("cost: 4"));
        assert!(!rendered.contains("$2"));
    }
}

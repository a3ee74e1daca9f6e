//! Core service configuration loaded via OrthoConfig.
//!
//! Values layer as OrthoConfig does: defaults, configuration file, `EVENTS_*`
//! environment variables, then command-line flags.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::security::{DEFAULT_COST, EmptySigningKey, SigningKey};

const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 3_000;

/// Problems found while turning settings into typed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// No database URL was configured.
    #[error("EVENTS_DATABASE_URL is not set")]
    MissingDatabaseUrl,
    /// No token signing secret was configured.
    #[error("EVENTS_JWT_SECRET is not set")]
    MissingJwtSecret,
    /// The token signing secret was configured but empty.
    #[error("EVENTS_JWT_SECRET must not be empty")]
    EmptyJwtSecret,
    /// A zero storage timeout would fail every operation.
    #[error("EVENTS_STORAGE_TIMEOUT_MS must be greater than zero")]
    ZeroStorageTimeout,
}

impl From<EmptySigningKey> for SettingsError {
    fn from(_: EmptySigningKey) -> Self {
        Self::EmptyJwtSecret
    }
}

/// Settings for the identity and membership services.
///
/// Scalar fields carry declared defaults so loading succeeds with nothing
/// configured; missing secrets surface from the accessors instead.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVENTS")]
pub struct CoreSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: Option<String>,
    /// bcrypt work factor.
    #[ortho_config(default = 12)]
    pub bcrypt_cost: u32,
    /// Deadline for a single storage operation, in milliseconds.
    #[ortho_config(default = 3000)]
    pub storage_timeout_ms: u64,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            database_url: None,
            jwt_secret: None,
            bcrypt_cost: DEFAULT_COST,
            storage_timeout_ms: DEFAULT_STORAGE_TIMEOUT_MS,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
        }
    }
}

impl fmt::Debug for CoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("CoreSettings")
            .field("database_url", &redact(&self.database_url))
            .field("jwt_secret", &redact(&self.jwt_secret))
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("storage_timeout_ms", &self.storage_timeout_ms)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

impl CoreSettings {
    /// Configured database URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Token signing key built from the configured secret.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingJwtSecret`] when unset and
    /// [`SettingsError::EmptyJwtSecret`] when empty.
    pub fn signing_key(&self) -> Result<SigningKey, SettingsError> {
        let secret = self
            .jwt_secret
            .as_deref()
            .ok_or(SettingsError::MissingJwtSecret)?;
        Ok(SigningKey::new(secret.as_bytes())?)
    }

    /// bcrypt work factor, 12 unless configured.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    /// Per-operation storage deadline, three seconds unless configured.
    ///
    /// # Errors
    ///
    /// [`SettingsError::ZeroStorageTimeout`] when configured as zero.
    pub fn storage_timeout(&self) -> Result<Duration, SettingsError> {
        match self.storage_timeout_ms {
            0 => Err(SettingsError::ZeroStorageTimeout),
            ms => Ok(Duration::from_millis(ms)),
        }
    }

    /// Connection pool size, 10 unless configured.
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for core settings parsing.

    use super::*;
    use std::ffi::OsString;

    use crate::outbound::persistence::DEFAULT_OPERATION_TIMEOUT;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "EVENTS_DATABASE_URL",
        "EVENTS_JWT_SECRET",
        "EVENTS_BCRYPT_COST",
        "EVENTS_STORAGE_TIMEOUT_MS",
        "EVENTS_POOL_MAX_SIZE",
    ];

    fn load_from_empty_args() -> CoreSettings {
        CoreSettings::load_from_iter([OsString::from("events-core")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bcrypt_cost(), 12);
        assert_eq!(settings.storage_timeout(), Ok(Duration::from_secs(3)));
        assert_eq!(settings.pool_max_size(), 10);
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
        assert!(matches!(
            settings.signing_key(),
            Err(SettingsError::MissingJwtSecret)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "EVENTS_DATABASE_URL",
                Some("postgres://localhost/events".to_owned()),
            ),
            ("EVENTS_JWT_SECRET", Some("s3cret-s3cret-s3cret".to_owned())),
            ("EVENTS_BCRYPT_COST", Some("4".to_owned())),
            ("EVENTS_STORAGE_TIMEOUT_MS", Some("250".to_owned())),
            ("EVENTS_POOL_MAX_SIZE", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.database_url(), Ok("postgres://localhost/events"));
        assert!(settings.signing_key().is_ok());
        assert_eq!(settings.bcrypt_cost(), 4);
        assert_eq!(settings.storage_timeout(), Ok(Duration::from_millis(250)));
        assert_eq!(settings.pool_max_size(), 3);
    }

    #[rstest]
    #[case(Some(String::new()), SettingsError::EmptyJwtSecret)]
    #[case(None, SettingsError::MissingJwtSecret)]
    fn unusable_secret_is_reported(#[case] secret: Option<String>, #[case] expected: SettingsError) {
        let settings = CoreSettings {
            jwt_secret: secret,
            ..CoreSettings::default()
        };

        assert_eq!(settings.signing_key().map(|_| ()), Err(expected));
    }

    #[rstest]
    fn zero_timeout_is_rejected() {
        let settings = CoreSettings {
            storage_timeout_ms: 0,
            ..CoreSettings::default()
        };

        assert_eq!(
            settings.storage_timeout(),
            Err(SettingsError::ZeroStorageTimeout)
        );
    }

    #[rstest]
    fn declared_defaults_match_adapter_defaults() {
        let settings = CoreSettings::default();

        assert_eq!(settings.bcrypt_cost(), DEFAULT_COST);
        assert_eq!(settings.storage_timeout(), Ok(DEFAULT_OPERATION_TIMEOUT));
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn debug_redacts_secrets() {
        let settings = CoreSettings {
            database_url: Some("postgres://admin:hunter2@db/events".to_owned()),
            jwt_secret: Some("top-secret".to_owned()),
            ..CoreSettings::default()
        };

        let rendered = format!("{settings:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("top-secret"));
    }
}

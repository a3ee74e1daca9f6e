//! Service wiring: builds the driving ports from settings and adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{CoreSettings, SettingsError};
use crate::domain::ports::{
    AttendeesCommand, AttendeesQuery, CredentialStoreError, EventDirectory, IdentityCommand,
    MembershipLedger, TokenAuthenticator, UserDirectory, UserProfileQuery,
};
use crate::domain::{IdentityService, MembershipService};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselEventDirectory, DieselMembershipLedger, DieselUserDirectory, PoolConfig,
    PoolError,
};
use crate::outbound::security::{BcryptCredentialStore, JwtTokenIssuer, SigningKey};

/// Failures while assembling the services.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Settings were missing or unusable.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The credential store rejected its configuration.
    #[error("credential store: {0}")]
    Credentials(#[from] CredentialStoreError),
    /// The database pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Driving ports exposed to inbound adapters.
#[derive(Clone)]
pub struct CoreServices {
    /// Registration and login.
    pub identity: Arc<dyn IdentityCommand>,
    /// Bearer-token validation.
    pub authenticator: Arc<dyn TokenAuthenticator>,
    /// User lookup by id.
    pub profiles: Arc<dyn UserProfileQuery>,
    /// Adding and removing attendees.
    pub attendees: Arc<dyn AttendeesCommand>,
    /// Attendee and attended-event listings.
    pub attendance: Arc<dyn AttendeesQuery>,
}

impl CoreServices {
    /// Wire services over arbitrary storage adapters.
    ///
    /// Builds the credential store on the calling thread, which costs one
    /// bcrypt hash. Async callers should prefer [`connect`].
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when the signing secret or bcrypt cost is
    /// unusable.
    pub fn assemble<U, E, L>(
        settings: &CoreSettings,
        users: Arc<U>,
        events: Arc<E>,
        ledger: Arc<L>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Result<Self, StartupError>
    where
        U: UserDirectory + 'static,
        E: EventDirectory + 'static,
        L: MembershipLedger + 'static,
    {
        let key = settings.signing_key()?;
        let credentials = Arc::new(BcryptCredentialStore::new(settings.bcrypt_cost())?);
        Ok(Self::wire(&key, credentials, users, events, ledger, clock))
    }

    fn wire<U, E, L>(
        key: &SigningKey,
        credentials: Arc<BcryptCredentialStore>,
        users: Arc<U>,
        events: Arc<E>,
        ledger: Arc<L>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self
    where
        U: UserDirectory + 'static,
        E: EventDirectory + 'static,
        L: MembershipLedger + 'static,
    {
        let tokens = Arc::new(JwtTokenIssuer::new(key, clock));

        let identity = Arc::new(IdentityService::new(users.clone(), credentials, tokens));
        let membership = Arc::new(MembershipService::new(events, users, ledger));

        Self {
            identity: identity.clone(),
            authenticator: identity.clone(),
            profiles: identity,
            attendees: membership.clone(),
            attendance: membership,
        }
    }
}

/// Build the credential store on the blocking pool; its decoy hash is as
/// expensive as a registration.
async fn credential_store(cost: u32) -> Result<BcryptCredentialStore, StartupError> {
    tokio::task::spawn_blocking(move || BcryptCredentialStore::new(cost))
        .await
        .map_err(|err| CredentialStoreError::hashing(err.to_string()))?
        .map_err(StartupError::from)
}

/// Wire services over PostgreSQL.
///
/// # Errors
///
/// Returns [`StartupError`] for missing settings or when the pool cannot be
/// built.
pub async fn connect(settings: &CoreSettings) -> Result<CoreServices, StartupError> {
    let config = PoolConfig::new(settings.database_url()?)
        .with_max_size(settings.pool_max_size())
        .with_connection_timeout(settings.storage_timeout()?)
        .with_operation_timeout(settings.storage_timeout()?);
    let key = settings.signing_key()?;
    let credentials = Arc::new(credential_store(settings.bcrypt_cost()).await?);
    let pool = DbPool::new(config).await?;

    let services = CoreServices::wire(
        &key,
        credentials,
        Arc::new(DieselUserDirectory::new(pool.clone())),
        Arc::new(DieselEventDirectory::new(pool.clone())),
        Arc::new(DieselMembershipLedger::new(pool)),
        Arc::new(DefaultClock),
    );
    info!(
        pool_max_size = settings.pool_max_size(),
        "connected core services to postgres"
    );
    Ok(services)
}

/// Wire services over a fresh [`InMemoryStore`], returned for seeding events.
///
/// # Errors
///
/// Returns [`StartupError`] when the signing secret or bcrypt cost is
/// unusable.
pub fn in_memory(
    settings: &CoreSettings,
) -> Result<(CoreServices, Arc<InMemoryStore>), StartupError> {
    let store = Arc::new(InMemoryStore::new());
    let services = CoreServices::assemble(
        settings,
        store.clone(),
        store.clone(),
        store.clone(),
        Arc::new(DefaultClock),
    )?;
    Ok((services, store))
}

/// Install a JSON `tracing` subscriber filtered by `RUST_LOG`.
///
/// A second call leaves the existing subscriber in place.
pub fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod attendees_command;
mod attendees_query;
mod credential_store;
mod event_directory;
mod identity_command;
mod membership_ledger;
mod token_authenticator;
mod token_issuer;
mod user_directory;
mod user_profile_query;

pub use attendees_command::AttendeesCommand;
pub use attendees_query::AttendeesQuery;
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use event_directory::MockEventDirectory;
pub use event_directory::{EventDirectory, EventDirectoryError};
pub use identity_command::IdentityCommand;
#[cfg(test)]
pub use membership_ledger::MockMembershipLedger;
pub use membership_ledger::{MembershipLedger, MembershipLedgerError};
pub use token_authenticator::TokenAuthenticator;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{UserDirectory, UserDirectoryError};
pub use user_profile_query::UserProfileQuery;

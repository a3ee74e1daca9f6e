//! Port for the attendance relation between users and events.
//!
//! The ledger owns membership rows. Adapters must make `insert` an atomic
//! insert-if-absent keyed on `(event_id, user_id)`: concurrent identical
//! inserts yield exactly one row, and every other caller sees
//! [`MembershipLedgerError::Duplicate`].

use async_trait::async_trait;

use crate::domain::{Event, EventId, Membership, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by membership ledger adapters.
    pub enum MembershipLedgerError {
        /// Repository connection could not be established.
        Connection { message: String } => "membership ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "membership ledger query failed: {message}",
        /// The operation did not finish within the storage deadline.
        Timeout { operation: String } => "membership ledger {operation} timed out",
        /// A membership for the pair already exists.
        Duplicate => "membership already exists",
        /// The referenced event or user vanished before the row was written.
        MissingReference { entity: String } => "referenced {entity} does not exist",
    }
}

/// Storage contract for membership rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembershipLedger: Send + Sync {
    /// Atomically create the membership unless one already exists.
    async fn insert(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Membership, MembershipLedgerError>;

    /// Fetch the membership for a pair, if any.
    async fn find(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Membership>, MembershipLedgerError>;

    /// Delete the membership for a pair. Returns whether a row was removed.
    async fn delete(&self, event_id: EventId, user_id: UserId)
    -> Result<bool, MembershipLedgerError>;

    /// Users attending an event, ordered by user id.
    async fn list_members(&self, event_id: EventId) -> Result<Vec<User>, MembershipLedgerError>;

    /// Events a user attends, ordered by event id.
    async fn list_events(&self, user_id: UserId) -> Result<Vec<Event>, MembershipLedgerError>;
}

//! Attendance management over the event directory and membership ledger.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AttendeesCommand, AttendeesQuery, EventDirectory, MembershipLedger, MembershipLedgerError,
    UserDirectory,
};
use crate::domain::{Error, Event, EventId, Membership, User, UserId};

use super::storage_errors::{
    map_event_directory_error, map_membership_ledger_error, map_user_directory_error,
};

/// Membership service implementing the attendee driving ports.
///
/// The ledger's uniqueness constraint is the only arbiter of duplicates.
/// Pre-checks here exist to return precise errors, not to serialise writers.
#[derive(Clone)]
pub struct MembershipService<E, U, L> {
    events: Arc<E>,
    users: Arc<U>,
    ledger: Arc<L>,
}

impl<E, U, L> MembershipService<E, U, L> {
    /// Create a new service over the given ports.
    pub fn new(events: Arc<E>, users: Arc<U>, ledger: Arc<L>) -> Self {
        Self {
            events,
            users,
            ledger,
        }
    }
}

impl<E, U, L> MembershipService<E, U, L>
where
    E: EventDirectory,
    U: UserDirectory,
    L: MembershipLedger,
{
    async fn require_event(&self, event_id: EventId) -> Result<Event, Error> {
        self.events
            .find_by_id(event_id)
            .await
            .map_err(map_event_directory_error)?
            .ok_or_else(|| Error::not_found("event not found"))
    }

    async fn require_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_directory_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}

#[async_trait]
impl<E, U, L> AttendeesCommand for MembershipService<E, U, L>
where
    E: EventDirectory,
    U: UserDirectory,
    L: MembershipLedger,
{
    async fn add_attendee(&self, event_id: EventId, user_id: UserId) -> Result<Membership, Error> {
        self.require_event(event_id).await?;
        self.require_user(user_id).await?;

        let existing = self
            .ledger
            .find(event_id, user_id)
            .await
            .map_err(map_membership_ledger_error)?;
        if existing.is_some() {
            return Err(map_membership_ledger_error(MembershipLedgerError::duplicate()));
        }

        let membership = self
            .ledger
            .insert(event_id, user_id)
            .await
            .map_err(map_membership_ledger_error)?;
        info!(%event_id, %user_id, membership_id = %membership.id, "added attendee");
        Ok(membership)
    }

    async fn remove_attendee(&self, event_id: EventId, user_id: UserId) -> Result<(), Error> {
        let removed = self
            .ledger
            .delete(event_id, user_id)
            .await
            .map_err(map_membership_ledger_error)?;
        if removed {
            info!(%event_id, %user_id, "removed attendee");
        } else {
            debug!(%event_id, %user_id, "attendee already absent");
        }
        Ok(())
    }
}

#[async_trait]
impl<E, U, L> AttendeesQuery for MembershipService<E, U, L>
where
    E: EventDirectory,
    U: UserDirectory,
    L: MembershipLedger,
{
    async fn list_attendees(&self, event_id: EventId) -> Result<Vec<User>, Error> {
        self.ledger
            .list_members(event_id)
            .await
            .map_err(map_membership_ledger_error)
    }

    async fn list_events_for_attendee(&self, user_id: UserId) -> Result<Vec<Event>, Error> {
        self.ledger
            .list_events(user_id)
            .await
            .map_err(map_membership_ledger_error)
    }

    async fn attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Membership>, Error> {
        self.ledger
            .find(event_id, user_id)
            .await
            .map_err(map_membership_ledger_error)
    }
}

//! In-process storage adapter for development and tests.
//!
//! [`InMemoryStore`] implements the user directory, event directory, and
//! membership ledger over one mutex-guarded state, mirroring the PostgreSQL
//! constraints: unique emails, unique `(event, user)` memberships, foreign
//! keys from memberships to users and events, and cascading deletes.
//! Each port call takes the lock once, so check-and-insert is atomic.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    EventDirectory, EventDirectoryError, MembershipLedger, MembershipLedgerError, UserDirectory,
    UserDirectoryError,
};
use crate::domain::{
    EmailAddress, Event, EventId, Membership, MembershipId, NewUser, User, UserId, UserRecord,
};

#[derive(Default)]
struct State {
    users: BTreeMap<UserId, UserRecord>,
    emails: HashMap<String, UserId>,
    events: BTreeMap<EventId, Event>,
    memberships: BTreeMap<(EventId, UserId), Membership>,
    last_user_id: i64,
    last_membership_id: i64,
}

/// Shared in-memory backing store for all storage ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State is only mutated after every check passes, so a panic elsewhere
        // cannot leave it half-written.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or replace an event. Event CRUD is owned elsewhere; this seeds
    /// the directory the membership service reads from.
    pub fn put_event(&self, event: Event) {
        self.lock().events.insert(event.id, event);
    }

    /// Delete an event and, like `ON DELETE CASCADE`, its memberships.
    pub fn remove_event(&self, id: EventId) -> bool {
        let mut state = self.lock();
        let removed = state.events.remove(&id).is_some();
        if removed {
            state.memberships.retain(|(event_id, _), _| *event_id != id);
        }
        removed
    }

    /// Delete a user and, like `ON DELETE CASCADE`, their memberships.
    pub fn remove_user(&self, id: UserId) -> bool {
        let mut state = self.lock();
        let Some(record) = state.users.remove(&id) else {
            return false;
        };
        state.emails.remove(record.user().email().as_ref());
        state.memberships.retain(|(_, user_id), _| *user_id != id);
        true
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self.lock().users.get(&id).map(|record| record.user().clone()))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserDirectoryError> {
        let state = self.lock();
        Ok(state
            .emails
            .get(email.as_ref())
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserDirectoryError> {
        let mut state = self.lock();
        if state.emails.contains_key(user.email.as_ref()) {
            return Err(UserDirectoryError::duplicate_email());
        }

        let raw_id = next_id(&mut state.last_user_id);
        let id = UserId::new(raw_id)
            .map_err(|err| UserDirectoryError::query(format!("id sequence: {err}")))?;
        let created = User::new(id, user.email.clone(), user.name.clone());
        state.emails.insert(user.email.as_ref().to_owned(), id);
        state.users.insert(
            id,
            UserRecord::new(created.clone(), user.password_hash.clone()),
        );
        Ok(created)
    }
}

#[async_trait]
impl EventDirectory for InMemoryStore {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventDirectoryError> {
        Ok(self.lock().events.get(&id).cloned())
    }
}

#[async_trait]
impl MembershipLedger for InMemoryStore {
    async fn insert(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Membership, MembershipLedgerError> {
        let mut state = self.lock();
        if !state.events.contains_key(&event_id) {
            return Err(MembershipLedgerError::missing_reference("event"));
        }
        if !state.users.contains_key(&user_id) {
            return Err(MembershipLedgerError::missing_reference("user"));
        }
        if state.memberships.contains_key(&(event_id, user_id)) {
            debug!(%event_id, %user_id, "membership already present");
            return Err(MembershipLedgerError::duplicate());
        }

        let id = MembershipId::new(next_id(&mut state.last_membership_id));
        let membership = Membership::new(id, event_id, user_id);
        state.memberships.insert((event_id, user_id), membership);
        Ok(membership)
    }

    async fn find(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Membership>, MembershipLedgerError> {
        Ok(self.lock().memberships.get(&(event_id, user_id)).copied())
    }

    async fn delete(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<bool, MembershipLedgerError> {
        Ok(self
            .lock()
            .memberships
            .remove(&(event_id, user_id))
            .is_some())
    }

    async fn list_members(&self, event_id: EventId) -> Result<Vec<User>, MembershipLedgerError> {
        let state = self.lock();
        let mut members: Vec<User> = state
            .memberships
            .keys()
            .filter(|(event, _)| *event == event_id)
            .filter_map(|(_, user_id)| state.users.get(user_id))
            .map(|record| record.user().clone())
            .collect();
        members.sort_by_key(User::id);
        Ok(members)
    }

    async fn list_events(&self, user_id: UserId) -> Result<Vec<Event>, MembershipLedgerError> {
        let state = self.lock();
        // Keys sort by event id first, so the scan is already ordered.
        Ok(state
            .memberships
            .keys()
            .filter(|(_, user)| *user == user_id)
            .filter_map(|(event_id, _)| state.events.get(event_id))
            .cloned()
            .collect())
    }
}

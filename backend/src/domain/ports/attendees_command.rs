//! Driving port for changing who attends an event.

use async_trait::async_trait;

use crate::domain::{Error, EventId, Membership, UserId};

/// Attendance mutations.
#[async_trait]
pub trait AttendeesCommand: Send + Sync {
    /// Add a user to an event.
    ///
    /// Fails with `NotFound` when the event or user does not exist and with
    /// `Conflict` when the user already attends the event.
    async fn add_attendee(&self, event_id: EventId, user_id: UserId) -> Result<Membership, Error>;

    /// Remove a user from an event. Succeeds whether or not they attended.
    async fn remove_attendee(&self, event_id: EventId, user_id: UserId) -> Result<(), Error>;
}

//! Driving port for reading the attendance relation.

use async_trait::async_trait;

use crate::domain::{Error, Event, EventId, Membership, User, UserId};

/// Attendance reads.
///
/// Empty results do not distinguish "no attendees" from "no such event";
/// callers that care must check existence separately.
#[async_trait]
pub trait AttendeesQuery: Send + Sync {
    /// Users attending `event_id`.
    async fn list_attendees(&self, event_id: EventId) -> Result<Vec<User>, Error>;

    /// Events that `user_id` attends.
    async fn list_events_for_attendee(&self, user_id: UserId) -> Result<Vec<Event>, Error>;

    /// The membership row for a pair, if the user attends the event.
    async fn attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Membership>, Error>;
}

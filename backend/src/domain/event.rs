//! Event records as seen by the membership core.
//!
//! Event CRUD lives elsewhere; this module only needs enough shape to report
//! which events a user attends and to check that an event exists.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Validation error for event identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonPositiveEventId;

impl fmt::Display for NonPositiveEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event id must be a positive integer")
    }
}

impl std::error::Error for NonPositiveEventId {}

/// Storage-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct EventId(i64);

impl EventId {
    /// Validate and construct an [`EventId`].
    pub fn new(id: i64) -> Result<Self, NonPositiveEventId> {
        if id <= 0 {
            return Err(NonPositiveEventId);
        }
        Ok(Self(id))
    }

    /// Raw integer value as stored.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EventId> for i64 {
    fn from(value: EventId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for EventId {
    type Error = NonPositiveEventId;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Event record.
///
/// `owner_id` is carried as stored. Membership operations depend only on the
/// event existing, not on the owner still being a valid user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    /// Date exactly as stored; the core never interprets it.
    pub date: String,
    pub location: String,
}

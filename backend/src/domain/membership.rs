//! Membership rows joining users to the events they attend.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EventId, UserId};

/// Storage-assigned membership identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipId(i64);

impl MembershipId {
    /// Wrap an identifier read back from storage.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value as stored.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for MembershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user attending an event.
///
/// ## Invariants
/// - At most one membership exists per `(event_id, user_id)` pair; storage
///   enforces this with a uniqueness constraint.
/// - Memberships are created and deleted, never updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: MembershipId,
    pub event_id: EventId,
    pub user_id: UserId,
}

impl Membership {
    /// Assemble a membership from its stored columns.
    pub fn new(id: MembershipId, event_id: EventId, user_id: UserId) -> Self {
        Self {
            id,
            event_id,
            user_id,
        }
    }

    /// Whether this row represents the given pair.
    pub fn matches(&self, event_id: EventId, user_id: UserId) -> bool {
        self.event_id == event_id && self.user_id == user_id
    }
}

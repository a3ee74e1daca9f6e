//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Conversions into domain
//! types re-validate, because the database does not enforce every domain
//! rule (email syntax, name length, positive ids).

use diesel::prelude::*;

use crate::domain::{
    Event, EventId, Membership, MembershipId, NewUser, PasswordHash, User, UserId, UserRecord,
};

use super::schema::{attendees, events, users};

/// Public columns of the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub name: String,
}

/// Users row including the stored secret; only read on login paths.
#[derive(Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserSecretRow {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Insertable struct for creating new user records.
#[derive(Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email.as_ref(),
            name: user.name.as_ref(),
            password: user.password_hash.expose(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: String,
    pub date: String,
    pub location: String,
}

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = attendees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttendeeRow {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = attendees)]
pub(crate) struct NewAttendeeRow {
    pub event_id: i64,
    pub user_id: i64,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        User::try_from_parts(row.id, &row.email, &row.name)
            .map_err(|err| format!("invalid user row {}: {err}", row.id))
    }
}

impl TryFrom<UserSecretRow> for UserRecord {
    type Error = String;

    fn try_from(row: UserSecretRow) -> Result<Self, Self::Error> {
        let user = User::try_from_parts(row.id, &row.email, &row.name)
            .map_err(|err| format!("invalid user row {}: {err}", row.id))?;
        Ok(UserRecord::new(user, PasswordHash::new(row.password)))
    }
}

impl TryFrom<EventRow> for Event {
    type Error = String;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        let id = EventId::new(row.id).map_err(|err| format!("invalid event row: {err}"))?;
        let owner_id = UserId::new(row.owner_id)
            .map_err(|err| format!("invalid owner on event {}: {err}", row.id))?;
        Ok(Event {
            id,
            owner_id,
            title: row.name,
            description: row.description,
            date: row.date,
            location: row.location,
        })
    }
}

impl TryFrom<AttendeeRow> for Membership {
    type Error = String;

    fn try_from(row: AttendeeRow) -> Result<Self, Self::Error> {
        let event_id = EventId::new(row.event_id)
            .map_err(|err| format!("invalid attendee row {}: {err}", row.id))?;
        let user_id = UserId::new(row.user_id)
            .map_err(|err| format!("invalid attendee row {}: {err}", row.id))?;
        Ok(Membership::new(MembershipId::new(row.id), event_id, user_id))
    }
}

impl From<(EventId, UserId)> for NewAttendeeRow {
    fn from((event_id, user_id): (EventId, UserId)) -> Self {
        Self {
            event_id: event_id.get(),
            user_id: user_id.get(),
        }
    }
}

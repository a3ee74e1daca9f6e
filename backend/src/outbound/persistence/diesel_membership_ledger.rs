//! PostgreSQL-backed `MembershipLedger` implementation using Diesel ORM.
//!
//! Inserts rely on the `(event_id, user_id)` unique index:
//! `ON CONFLICT DO NOTHING RETURNING` yields no row for an existing pair, which
//! keeps insert-if-absent a single atomic statement under concurrency.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MembershipLedger, MembershipLedgerError};
use crate::domain::{Event, EventId, Membership, User, UserId};

use super::diesel_basic_error_mapping::{StorageFailure, classify_diesel_error, referenced_entity};
use super::models::{AttendeeRow, EventRow, NewAttendeeRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{attendees, events, users};

/// Diesel-backed implementation of the `MembershipLedger` port.
#[derive(Clone)]
pub struct DieselMembershipLedger {
    pool: DbPool,
}

impl DieselMembershipLedger {
    /// Create a new ledger with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MembershipLedgerError {
    MembershipLedgerError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> MembershipLedgerError {
    match classify_diesel_error(error) {
        StorageFailure::Connection(message) => MembershipLedgerError::connection(message),
        StorageFailure::Query(message) => MembershipLedgerError::query(message),
        StorageFailure::UniqueViolation { .. } => MembershipLedgerError::duplicate(),
        StorageFailure::ForeignKeyViolation { constraint } => {
            MembershipLedgerError::missing_reference(referenced_entity(constraint.as_deref()))
        }
    }
}

fn collect_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, MembershipLedgerError>
where
    T: TryFrom<R, Error = String>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(MembershipLedgerError::query)
}

#[async_trait]
impl MembershipLedger for DieselMembershipLedger {
    async fn insert(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Membership, MembershipLedgerError> {
        self.pool
            .bounded(
                "insert",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<AttendeeRow> = diesel::insert_into(attendees::table)
                        .values(NewAttendeeRow::from((event_id, user_id)))
                        .on_conflict((attendees::event_id, attendees::user_id))
                        .do_nothing()
                        .returning(AttendeeRow::as_returning())
                        .get_result(&mut conn)
                        .await
                        .optional()
                        .map_err(map_diesel_error)?;

                    match row {
                        Some(row) => Membership::try_from(row).map_err(MembershipLedgerError::query),
                        None => Err(MembershipLedgerError::duplicate()),
                    }
                },
                MembershipLedgerError::timeout,
            )
            .await
    }

    async fn find(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Membership>, MembershipLedgerError> {
        self.pool
            .bounded(
                "find",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<AttendeeRow> = attendees::table
                        .filter(attendees::event_id.eq(event_id.get()))
                        .filter(attendees::user_id.eq(user_id.get()))
                        .select(AttendeeRow::as_select())
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(map_diesel_error)?;
                    row.map(Membership::try_from)
                        .transpose()
                        .map_err(MembershipLedgerError::query)
                },
                MembershipLedgerError::timeout,
            )
            .await
    }

    async fn delete(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<bool, MembershipLedgerError> {
        self.pool
            .bounded(
                "delete",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let deleted = diesel::delete(
                        attendees::table
                            .filter(attendees::event_id.eq(event_id.get()))
                            .filter(attendees::user_id.eq(user_id.get())),
                    )
                    .execute(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;
                    Ok(deleted > 0)
                },
                MembershipLedgerError::timeout,
            )
            .await
    }

    async fn list_members(&self, event_id: EventId) -> Result<Vec<User>, MembershipLedgerError> {
        self.pool
            .bounded(
                "list_members",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let rows: Vec<UserRow> = attendees::table
                        .inner_join(users::table)
                        .filter(attendees::event_id.eq(event_id.get()))
                        .select(UserRow::as_select())
                        .order_by(users::id.asc())
                        .load(&mut conn)
                        .await
                        .map_err(map_diesel_error)?;
                    collect_rows(rows)
                },
                MembershipLedgerError::timeout,
            )
            .await
    }

    async fn list_events(&self, user_id: UserId) -> Result<Vec<Event>, MembershipLedgerError> {
        self.pool
            .bounded(
                "list_events",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let rows: Vec<EventRow> = attendees::table
                        .inner_join(events::table)
                        .filter(attendees::user_id.eq(user_id.get()))
                        .select(EventRow::as_select())
                        .order_by(events::id.asc())
                        .load(&mut conn)
                        .await
                        .map_err(map_diesel_error)?;
                    collect_rows(rows)
                },
                MembershipLedgerError::timeout,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping and row conversion coverage; queries need a live database.
    use super::*;
    use crate::outbound::persistence::diesel_basic_error_mapping::database_error;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("attendees_event_id_user_id_key"),
        ));
        assert_eq!(err, MembershipLedgerError::Duplicate);
    }

    #[rstest]
    #[case("attendees_event_id_fkey", "event")]
    #[case("attendees_user_id_fkey", "user")]
    fn foreign_key_violation_names_missing_entity(
        #[case] constraint: &'static str,
        #[case] entity: &str,
    ) {
        let err = map_diesel_error(database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some(constraint),
        ));
        assert_eq!(err, MembershipLedgerError::missing_reference(entity));
    }

    #[rstest]
    fn invalid_rows_fail_the_whole_listing() {
        let rows = vec![
            AttendeeRow {
                id: 1,
                event_id: 10,
                user_id: 1,
            },
            AttendeeRow {
                id: 2,
                event_id: 10,
                user_id: 0,
            },
        ];

        let result: Result<Vec<Membership>, _> = collect_rows(rows);

        assert!(matches!(result, Err(MembershipLedgerError::Query { .. })));
    }
}

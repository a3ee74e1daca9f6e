//! PostgreSQL-backed `EventDirectory` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EventDirectory, EventDirectoryError};
use crate::domain::{Event, EventId};

use super::diesel_basic_error_mapping::{StorageFailure, classify_diesel_error};
use super::models::EventRow;
use super::pool::{DbPool, PoolError};
use super::schema::events;

/// Diesel-backed implementation of the `EventDirectory` port.
#[derive(Clone)]
pub struct DieselEventDirectory {
    pool: DbPool,
}

impl DieselEventDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventDirectoryError {
    EventDirectoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> EventDirectoryError {
    match classify_diesel_error(error) {
        StorageFailure::Connection(message) => EventDirectoryError::connection(message),
        StorageFailure::Query(message) => EventDirectoryError::query(message),
        StorageFailure::UniqueViolation { .. } | StorageFailure::ForeignKeyViolation { .. } => {
            EventDirectoryError::query("constraint violation")
        }
    }
}

#[async_trait]
impl EventDirectory for DieselEventDirectory {
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventDirectoryError> {
        self.pool
            .bounded(
                "find_by_id",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<EventRow> = events::table
                        .filter(events::id.eq(id.get()))
                        .select(EventRow::as_select())
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(map_diesel_error)?;
                    row.map(Event::try_from)
                        .transpose()
                        .map_err(EventDirectoryError::query)
                },
                EventDirectoryError::timeout,
            )
            .await
    }
}

//! Shared Diesel error classification for the persistence adapters.
//!
//! Each adapter turns a [`StorageFailure`] into its own port error, so the
//! Diesel-specific matching lives in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Adapter-neutral classification of a Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum StorageFailure {
    /// The connection broke or was closed underneath the statement.
    Connection(&'static str),
    /// The statement failed for any other reason.
    Query(&'static str),
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation { constraint: Option<String> },
}

/// Classify a Diesel error, logging the driver detail at `debug`.
pub(super) fn classify_diesel_error(error: DieselError) -> StorageFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StorageFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => StorageFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StorageFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StorageFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            StorageFailure::ForeignKeyViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        _ => StorageFailure::Query("database error"),
    }
}

/// Which referenced table a foreign key constraint name points at.
///
/// PostgreSQL names default constraints `<table>_<column>_fkey`.
pub(super) fn referenced_entity(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("event_id") => "event",
        Some(name) if name.contains("user_id") || name.contains("owner_id") => "user",
        _ => "referenced record",
    }
}


#[cfg(test)]
pub(super) use tests::database_error;

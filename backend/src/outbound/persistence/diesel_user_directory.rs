//! PostgreSQL-backed `UserDirectory` implementation using Diesel ORM.
//!
//! The unique index on `users.email` is the authority on duplicate
//! registrations; a violation surfaces as `UserDirectoryError::DuplicateEmail`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{EmailAddress, NewUser, User, UserId, UserRecord};

use super::diesel_basic_error_mapping::{StorageFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow, UserSecretRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserDirectory` port.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    /// Create a new directory with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserDirectoryError {
    UserDirectoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    match classify_diesel_error(error) {
        StorageFailure::Connection(message) => UserDirectoryError::connection(message),
        StorageFailure::UniqueViolation { .. } => UserDirectoryError::duplicate_email(),
        StorageFailure::ForeignKeyViolation { .. } => {
            UserDirectoryError::query("foreign key violation")
        }
        StorageFailure::Query(message) => UserDirectoryError::query(message),
    }
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        self.pool
            .bounded(
                "find_by_id",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<UserRow> = users::table
                        .filter(users::id.eq(id.get()))
                        .select(UserRow::as_select())
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(map_diesel_error)?;
                    row.map(User::try_from)
                        .transpose()
                        .map_err(UserDirectoryError::query)
                },
                UserDirectoryError::timeout,
            )
            .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserDirectoryError> {
        self.pool
            .bounded(
                "find_by_email",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<UserSecretRow> = users::table
                        .filter(users::email.eq(email.as_ref()))
                        .select(UserSecretRow::as_select())
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(map_diesel_error)?;
                    row.map(UserRecord::try_from)
                        .transpose()
                        .map_err(UserDirectoryError::query)
                },
                UserDirectoryError::timeout,
            )
            .await
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserDirectoryError> {
        self.pool
            .bounded(
                "insert",
                async {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: UserRow = diesel::insert_into(users::table)
                        .values(NewUserRow::from(user))
                        .returning(UserRow::as_returning())
                        .get_result(&mut conn)
                        .await
                        .map_err(map_diesel_error)?;
                    User::try_from(row).map_err(UserDirectoryError::query)
                },
                UserDirectoryError::timeout,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; queries need a live database.
    use super::*;
    use crate::outbound::persistence::diesel_basic_error_mapping::database_error;
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(repo_err, UserDirectoryError::Connection { .. }));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_email() {
        let repo_err = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("users_email_key"),
        ));

        assert_eq!(repo_err, UserDirectoryError::DuplicateEmail);
    }

    #[rstest]
    #[case(diesel::result::Error::NotFound)]
    #[case(database_error(DatabaseErrorKind::SerializationFailure, None))]
    fn other_failures_map_to_query_error(#[case] error: diesel::result::Error) {
        assert!(matches!(
            map_diesel_error(error),
            UserDirectoryError::Query { .. }
        ));
    }
}

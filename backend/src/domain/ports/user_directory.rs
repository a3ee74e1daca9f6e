//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user directory query failed: {message}",
        /// The operation did not finish within the storage deadline.
        Timeout { operation: String } => "user directory {operation} timed out",
        /// The unique email index rejected the insert.
        DuplicateEmail => "a user with this email already exists",
    }
}

/// Lookup and creation of user records.
///
/// `insert` must rely on a storage-level uniqueness constraint on `email`
/// and report a violation as [`UserDirectoryError::DuplicateEmail`]; callers
/// treat that signal as authoritative.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Fetch a user and its stored secret by exact email match.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserDirectoryError>;

    /// Insert a user and return it with its assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User, UserDirectoryError>;
}

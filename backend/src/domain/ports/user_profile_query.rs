//! Driving port for fetching a single user's public profile.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read access to registered users.
#[async_trait]
pub trait UserProfileQuery: Send + Sync {
    /// Fetch a user by id, failing with `NotFound` when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;
}

//! Port for read-only event lookups.
use async_trait::async_trait;

use crate::domain::{Event, EventId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by event directory adapters.
    pub enum EventDirectoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "event directory connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "event directory query failed: {message}",
        /// The lookup did not finish within the storage deadline.
        Timeout { operation: String } => "event directory {operation} timed out",
    }
}

/// Existence checks for events owned by the event CRUD layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// Fetch an event by identifier.
    async fn find_by_id(&self, id: EventId) -> Result<Option<Event>, EventDirectoryError>;
}

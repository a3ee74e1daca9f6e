//! Shared mapping from driven-port failures to caller-safe domain errors.
//!
//! Adapter detail is logged at `debug` and never copied into the returned
//! message.

use tracing::debug;

use super::Error;
use super::ports::{EventDirectoryError, MembershipLedgerError, UserDirectoryError};

const UNAVAILABLE: &str = "storage is temporarily unavailable";
const INTERNAL: &str = "storage operation failed";

pub(super) fn map_user_directory_error(error: UserDirectoryError) -> Error {
    debug!(error = %error, "user directory failure");
    match error {
        UserDirectoryError::Connection { .. } | UserDirectoryError::Timeout { .. } => {
            Error::service_unavailable(UNAVAILABLE)
        }
        UserDirectoryError::Query { .. } => Error::internal(INTERNAL),
        UserDirectoryError::DuplicateEmail => {
            Error::duplicate_email("a user with this email already exists")
        }
    }
}

pub(super) fn map_event_directory_error(error: EventDirectoryError) -> Error {
    debug!(error = %error, "event directory failure");
    match error {
        EventDirectoryError::Connection { .. } | EventDirectoryError::Timeout { .. } => {
            Error::service_unavailable(UNAVAILABLE)
        }
        EventDirectoryError::Query { .. } => Error::internal(INTERNAL),
    }
}

pub(super) fn map_membership_ledger_error(error: MembershipLedgerError) -> Error {
    debug!(error = %error, "membership ledger failure");
    match error {
        MembershipLedgerError::Connection { .. } | MembershipLedgerError::Timeout { .. } => {
            Error::service_unavailable(UNAVAILABLE)
        }
        MembershipLedgerError::Query { .. } => Error::internal(INTERNAL),
        MembershipLedgerError::Duplicate => {
            Error::conflict("user is already an attendee of this event")
        }
        MembershipLedgerError::MissingReference { entity } => {
            Error::not_found(format!("{entity} not found"))
        }
    }
}

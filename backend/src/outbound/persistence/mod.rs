//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user directory, event directory, and
//! membership ledger ports backed by PostgreSQL through `diesel-async` with
//! `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: implementations only translate between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never reach the domain layer.
//! - **Bounded operations**: checkout and statement share one deadline taken
//!   from the pool configuration; expiry is reported as the port's `Timeout`.
//! - **Constraint-driven uniqueness**: duplicate emails and memberships are
//!   detected by database constraints, not by read-then-write checks.
//!
//! # Example
//!
//! ```no_run
//! use events_core::outbound::persistence::{DbPool, DieselUserDirectory, PoolConfig};
//!
//! # async fn wire() -> Result<(), events_core::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/events")).await?;
//! let users = DieselUserDirectory::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_event_directory;
mod diesel_membership_ledger;
mod diesel_user_directory;
mod models;
mod pool;
mod schema;

pub use diesel_event_directory::DieselEventDirectory;
pub use diesel_membership_ledger::DieselMembershipLedger;
pub use diesel_user_directory::DieselUserDirectory;
pub use pool::{DEFAULT_OPERATION_TIMEOUT, DbPool, PoolConfig, PoolError};

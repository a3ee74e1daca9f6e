//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed directories and ledger using Diesel ORM
//! - **memory**: in-process store with the same constraints, for development
//!   and tests
//! - **security**: bcrypt password hashing and HS256 bearer tokens
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;

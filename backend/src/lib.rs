//! Identity and event-membership core.
//!
//! - [`domain`]: entities, ports, and the identity and membership services.
//! - [`outbound`]: PostgreSQL, in-memory, bcrypt, and JWT adapters.
//! - [`config`]: OrthoConfig-backed settings.
//! - [`bootstrap`]: wiring of services over adapters, plus tracing setup.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;

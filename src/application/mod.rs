//! Application layer services implementing business logic.
//!
//! Services orchestrate validation, identifier generation and store calls,
//! and expose a backend-agnostic API to the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_registry::LinkRegistry`] - Expiring link creation and resolution

pub mod services;

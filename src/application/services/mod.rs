//! Business logic services for the application layer.

pub mod link_registry;

pub use link_registry::{DEFAULT_STORE_TIMEOUT, LinkRegistry, MAX_TTL_DAYS, MIN_TTL_DAYS};

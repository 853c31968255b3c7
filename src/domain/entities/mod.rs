//! Core domain entities.
//!
//! - [`LinkRecord`] - A persisted, immutable short-code mapping with an expiry
//! - [`NewLink`] - Input for creating a record

pub mod link;

pub use link::{LinkRecord, NewLink};

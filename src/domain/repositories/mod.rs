//! Storage trait definitions for the domain layer.
//!
//! The registry depends only on [`LinkStore`]; concrete backends live in
//! `crate::infrastructure::persistence` and a `mockall` mock is generated for
//! unit tests.

pub mod link_store;

pub use link_store::{LinkStore, StoreError, StoreResult};

#[cfg(test)]
pub use link_store::MockLinkStore;

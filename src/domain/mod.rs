//! Domain layer containing the link entity and the store contract.
//!
//! - [`entities`] - [`entities::LinkRecord`] and creation input
//! - [`repositories`] - the [`repositories::LinkStore`] trait implemented by
//!   the infrastructure layer
//!
//! The domain layer has no dependency on HTTP or on any particular backend.

pub mod entities;
pub mod repositories;

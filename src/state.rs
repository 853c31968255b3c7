use std::sync::Arc;

use crate::application::services::LinkRegistry;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_registry: Arc<LinkRegistry>,
    /// Fallback origin for short URLs when the request carries no `Origin` header.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(link_registry: Arc<LinkRegistry>, public_base_url: Option<String>) -> Self {
        Self {
            link_registry,
            public_base_url,
        }
    }
}

#![allow(dead_code)]

use chrono::{Duration, SubsecRound, Utc};
use std::sync::Arc;
use ttl_shortener::application::services::{DEFAULT_STORE_TIMEOUT, LinkRegistry};
use ttl_shortener::domain::entities::LinkRecord;
use ttl_shortener::domain::repositories::LinkStore;
use ttl_shortener::infrastructure::persistence::MemoryLinkStore;
use ttl_shortener::state::AppState;

pub const PUBLIC_BASE_URL: &str = "https://sho.rt";

/// Builds state over a fresh in-memory store and returns the store for inspection.
pub fn create_test_state() -> (AppState, Arc<MemoryLinkStore>) {
    create_test_state_with_base_url(Some(PUBLIC_BASE_URL))
}

pub fn create_test_state_with_base_url(
    public_base_url: Option<&str>,
) -> (AppState, Arc<MemoryLinkStore>) {
    let store = Arc::new(MemoryLinkStore::new());
    let registry = Arc::new(LinkRegistry::new(
        store.clone() as Arc<dyn LinkStore>,
        DEFAULT_STORE_TIMEOUT,
    ));

    let state = AppState::new(registry, public_base_url.map(str::to_string));

    (state, store)
}

pub async fn create_test_link(store: &MemoryLinkStore, code: &str, url: &str, ttl_days: i64) {
    let record = LinkRecord::new(
        code.to_string(),
        url.to_string(),
        Utc::now().trunc_subsecs(3),
        ttl_days,
    );
    store.put(code, record).await.unwrap();
}

/// Stores a one-day link created two days ago, so it expired a day ago.
pub async fn create_expired_link(store: &MemoryLinkStore, code: &str, url: &str) {
    let record = LinkRecord::new(
        code.to_string(),
        url.to_string(),
        Utc::now().trunc_subsecs(3) - Duration::days(2),
        1,
    );
    store.put(code, record).await.unwrap();
}

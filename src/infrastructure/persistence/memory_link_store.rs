//! In-process link store.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::{LinkStore, StoreResult};

/// Link store backed by a concurrent hash map.
///
/// Nothing survives a restart. Used by the test suite and when the service is
/// started without any backend credentials.
#[derive(Debug, Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, LinkRecord>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn get(&self, code: &str) -> StoreResult<Option<LinkRecord>> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn put(&self, code: &str, record: LinkRecord) -> StoreResult<()> {
        self.links.insert(code.to_string(), record);
        Ok(())
    }

    async fn delete(&self, code: &str) -> StoreResult<()> {
        self.links.remove(code);
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

//! crates/phrontier_core/src/memory.rs
//!
//! An in-process [`CollectionStore`]. Backs the test suites and lets the
//! catalog run embedded in a single process without a hosted key-value
//! store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::Resource;
use crate::ports::{CollectionStore, PortError, PortResult};

pub struct MemoryStore {
    // `None` models a key that has never been written.
    inner: RwLock<Option<Vec<Resource>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    pub fn with_seed(resources: Vec<Resource>) -> Self {
        Self {
            inner: RwLock::new(Some(resources)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn fetch(&self) -> PortResult<Option<Vec<Resource>>> {
        let guard = self
            .inner
            .read()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn store(&self, resources: &[Resource]) -> PortResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        *guard = Some(resources.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_resources;

    #[tokio::test]
    async fn an_unwritten_store_fetches_none() {
        assert!(MemoryStore::new().fetch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn store_then_fetch_round_trips() {
        let store = MemoryStore::new();
        let seeds = seed_resources();
        store.store(&seeds).await.unwrap();
        assert_eq!(store.fetch().await.unwrap(), Some(seeds));
    }

    #[tokio::test]
    async fn a_seeded_store_fetches_its_seed() {
        let store = MemoryStore::with_seed(seed_resources());
        assert_eq!(store.fetch().await.unwrap().unwrap().len(), 3);
    }
}

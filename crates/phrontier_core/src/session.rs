//! crates/phrontier_core/src/session.rs
//!
//! The client synchronization controller. One `CatalogSession` per client
//! session owns the locally visible resource list and keeps it consistent
//! with the shared catalog: a full fetch on session start, then optimistic
//! local application of each mutation that the catalog accepted.
//!
//! There is no background polling or subscription. Writes made by other
//! clients become visible on the next full `load()`; that staleness window
//! is accepted.

use std::sync::Arc;

use crate::catalog::ResourceCatalog;
use crate::domain::{Resource, User, UserRole};
use crate::ports::PortResult;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Loading,
    Ready,
}

pub struct CatalogSession {
    catalog: Arc<ResourceCatalog>,
    user: User,
    phase: SyncPhase,
    resources: Vec<Resource>,
    sync_error: Option<String>,
}

impl CatalogSession {
    pub fn new(catalog: Arc<ResourceCatalog>, user: User) -> Self {
        Self {
            catalog,
            user,
            phase: SyncPhase::Uninitialized,
            resources: Vec::new(),
            sync_error: None,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// The locally visible list, newest-first.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// The non-blocking sync failure indicator, if the last `load()` failed.
    pub fn sync_error(&self) -> Option<&str> {
        self.sync_error.as_deref()
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Whether this session offers the publish/edit/delete actions.
    pub fn can_publish(&self) -> bool {
        self.user.role == UserRole::Admin
    }

    /// Fetches the authoritative list. On failure the session still becomes
    /// Ready with an empty list and a visible sync error; the user may still
    /// attempt mutations, which fail independently.
    pub async fn load(&mut self) {
        self.phase = SyncPhase::Loading;
        match self.catalog.list().await {
            Ok(list) => {
                self.resources = list;
                self.sync_error = None;
            }
            Err(e) => {
                self.resources = Vec::new();
                self.sync_error = Some(e.to_string());
            }
        }
        self.phase = SyncPhase::Ready;
    }

    /// Publishes a record. On success the persisted record is prepended
    /// locally without a full re-list; on failure local state is untouched
    /// and the error is returned for display.
    pub async fn create(&mut self, record: Resource) -> PortResult<Resource> {
        let stored = self.catalog.create(record).await?;
        self.resources.insert(0, stored.clone());
        self.resources.truncate(self.catalog.limits().max_items);
        Ok(stored)
    }

    /// Edits a record in place. The local copy is replaced only after the
    /// catalog accepted the update.
    pub async fn update(&mut self, record: Resource) -> PortResult<Resource> {
        let stored = self.catalog.update(record).await?;
        if let Some(slot) = self.resources.iter_mut().find(|r| r.id == stored.id) {
            *slot = stored.clone();
        }
        Ok(stored)
    }

    /// Deletes a record. Removal is applied locally only after the catalog
    /// reported success.
    pub async fn delete(&mut self, id: &str) -> PortResult<()> {
        self.catalog.delete(id).await?;
        self.resources.retain(|r| r.id != id);
        Ok(())
    }

    /// Client-side browsing filter over the local list: a case-insensitive
    /// title/sub-category search plus an optional category restriction.
    pub fn filter(&self, query: &str, category: Option<&str>) -> Vec<&Resource> {
        let query = query.to_lowercase();
        self.resources
            .iter()
            .filter(|r| {
                let matches_search = r.title.to_lowercase().contains(&query)
                    || r.sub_category.to_lowercase().contains(&query);
                let matches_category = category.map_or(true, |c| r.category == c);
                matches_search && matches_category
            })
            .collect()
    }
}

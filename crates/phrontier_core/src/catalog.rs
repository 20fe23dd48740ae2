//! crates/phrontier_core/src/catalog.rs
//!
//! The resource catalog: list/create/update/delete semantics over the shared
//! collection held by a [`CollectionStore`]. This is the store boundary where
//! records are validated, normalized, and capped before persistence.
//!
//! Mutations are read-modify-write over the whole list with no locking.
//! Last writer wins; a concurrent create issued between another client's
//! read and write can be lost. That is the accepted consistency model for a
//! low-write-rate catalog, not a defect to engineer around.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::Resource;
use crate::enrich::OutcomeEnricher;
use crate::ports::{CollectionStore, PortError, PortResult};

/// Bounds that keep the shared collection from destabilizing the store.
#[derive(Debug, Clone, Copy)]
pub struct CatalogLimits {
    /// Records beyond this count are dropped from the tail after a create.
    pub max_items: usize,
    /// A `thumbnailUrl` string longer than this is stripped before
    /// persistence. Inline data-URI images otherwise bloat the single
    /// shared key.
    pub max_thumbnail_len: usize,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            max_items: 20,
            max_thumbnail_len: 5000,
        }
    }
}

/// The shared resource collection and its mutation rules.
pub struct ResourceCatalog {
    store: Arc<dyn CollectionStore>,
    outcomes: OutcomeEnricher,
    limits: CatalogLimits,
}

impl ResourceCatalog {
    pub fn new(
        store: Arc<dyn CollectionStore>,
        outcomes: OutcomeEnricher,
        limits: CatalogLimits,
    ) -> Self {
        Self {
            store,
            outcomes,
            limits,
        }
    }

    pub fn limits(&self) -> CatalogLimits {
        self.limits
    }

    /// Suggests learning outcomes for a draft record. Never fails; see
    /// [`OutcomeEnricher::suggest`].
    pub async fn suggest_outcomes(
        &self,
        title: &str,
        category: &str,
        description: &str,
    ) -> Vec<String> {
        self.outcomes.suggest(title, category, description).await
    }

    /// Returns the collection newest-first. An uninitialized store is an
    /// empty list, never an error.
    pub async fn list(&self) -> PortResult<Vec<Resource>> {
        Ok(self.store.fetch().await?.unwrap_or_default())
    }

    /// Validates, normalizes, and prepends a record, truncating the tail
    /// beyond `max_items`. Returns the record as persisted (with the
    /// assigned `id` and `createdAt`).
    pub async fn create(&self, mut record: Resource) -> PortResult<Resource> {
        validate(&record)?;

        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        if record.created_at.is_empty() {
            record.created_at = Utc::now().to_rfc3339();
        }
        self.sanitize(&mut record);

        if record.learning_outcomes.is_empty() {
            record.learning_outcomes = self
                .outcomes
                .suggest(&record.title, &record.category, &record.description)
                .await;
        }

        let mut current = self.list().await?;
        current.insert(0, record.clone());
        current.truncate(self.limits.max_items);
        self.store.store(&current).await?;

        Ok(record)
    }

    /// Replaces the record with a matching `id` wholesale, preserving the
    /// stored `createdAt`. An unknown `id` is a no-op success.
    pub async fn update(&self, mut record: Resource) -> PortResult<Resource> {
        if record.id.is_empty() {
            return Err(PortError::MissingField("id"));
        }
        validate(&record)?;
        self.sanitize(&mut record);

        let mut current = self.list().await?;
        for slot in current.iter_mut() {
            if slot.id == record.id {
                record.created_at = slot.created_at.clone();
                *slot = record.clone();
            }
        }
        self.store.store(&current).await?;

        Ok(record)
    }

    /// Removes the record with a matching `id` if present. Idempotent:
    /// deleting an absent `id` still succeeds.
    pub async fn delete(&self, id: &str) -> PortResult<()> {
        let mut current = self.list().await?;
        current.retain(|r| r.id != id);
        self.store.store(&current).await
    }

    fn sanitize(&self, record: &mut Resource) {
        let oversized = record
            .thumbnail_url
            .as_ref()
            .map_or(false, |t| t.len() > self.limits.max_thumbnail_len);
        if oversized {
            record.thumbnail_url = None;
        }
    }
}

fn validate(record: &Resource) -> PortResult<()> {
    if record.title.trim().is_empty() {
        return Err(PortError::MissingField("title"));
    }
    if record.category.trim().is_empty() {
        return Err(PortError::MissingField("category"));
    }
    if record.author.trim().is_empty() {
        return Err(PortError::MissingField("author"));
    }
    if record.description.trim().is_empty() {
        return Err(PortError::MissingField("description"));
    }
    if record.content_url.trim().is_empty() {
        return Err(PortError::MissingField("contentUrl"));
    }
    if !is_http_url(&record.content_url) {
        return Err(PortError::InvalidField {
            field: "contentUrl",
            reason: "must be an http(s) URL".to_string(),
        });
    }
    Ok(())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResourceType;
    use crate::memory::MemoryStore;
    use crate::ports::PortResult;
    use async_trait::async_trait;

    struct OfflineStore;

    #[async_trait]
    impl CollectionStore for OfflineStore {
        async fn fetch(&self) -> PortResult<Option<Vec<Resource>>> {
            Err(PortError::Unavailable("kv store unreachable".to_string()))
        }

        async fn store(&self, _: &[Resource]) -> PortResult<()> {
            Err(PortError::Unavailable("kv store unreachable".to_string()))
        }
    }

    fn catalog() -> ResourceCatalog {
        ResourceCatalog::new(
            Arc::new(MemoryStore::new()),
            OutcomeEnricher::disabled(),
            CatalogLimits::default(),
        )
    }

    fn draft(title: &str) -> Resource {
        Resource {
            title: title.to_string(),
            category: "Mechanics".to_string(),
            sub_category: "Kinematics".to_string(),
            kind: ResourceType::Simulation,
            author: "Test Author".to_string(),
            description: "A test resource.".to_string(),
            user_guide: "Use it.".to_string(),
            content_url: "https://example.com/sim".to_string(),
            ..Resource::default()
        }
    }

    #[tokio::test]
    async fn list_on_an_uninitialized_store_is_empty() {
        assert!(catalog().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let catalog = catalog();
        let stored = catalog.create(draft("Projectile Motion")).await.unwrap();
        assert!(!stored.id.is_empty());
        assert!(!stored.created_at.is_empty());

        let listed = catalog.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], stored);
    }

    #[tokio::test]
    async fn creates_are_listed_newest_first() {
        let catalog = catalog();
        for title in ["First", "Second", "Third"] {
            catalog.create(draft(title)).await.unwrap();
        }
        let listed = catalog.list().await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn the_record_cap_drops_the_oldest() {
        let store = Arc::new(MemoryStore::new());
        let catalog = ResourceCatalog::new(
            store,
            OutcomeEnricher::disabled(),
            CatalogLimits {
                max_items: 3,
                max_thumbnail_len: 5000,
            },
        );

        for title in ["A", "B", "C", "D"] {
            catalog.create(draft(title)).await.unwrap();
        }

        let listed = catalog.list().await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "C", "B"]);
    }

    #[tokio::test]
    async fn oversized_thumbnails_are_stripped() {
        let catalog = catalog();
        let mut record = draft("Inline Thumbnail");
        record.thumbnail_url = Some(format!("data:image/png;base64,{}", "A".repeat(6000)));

        let stored = catalog.create(record).await.unwrap();
        assert!(stored.thumbnail_url.is_none());
        assert!(catalog.list().await.unwrap()[0].thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn small_thumbnails_survive_unchanged() {
        let catalog = catalog();
        let mut record = draft("Linked Thumbnail");
        record.thumbnail_url = Some("https://example.com/t.png".to_string());

        let stored = catalog.create(record).await.unwrap();
        assert_eq!(
            stored.thumbnail_url.as_deref(),
            Some("https://example.com/t.png")
        );
    }

    #[tokio::test]
    async fn empty_outcomes_are_enriched_on_create() {
        let catalog = catalog();
        let stored = catalog.create(draft("Wave Basics")).await.unwrap();
        assert_eq!(
            stored.learning_outcomes,
            crate::enrich::fallback_outcomes("Wave Basics")
        );
    }

    #[tokio::test]
    async fn caller_supplied_outcomes_are_kept() {
        let catalog = catalog();
        let mut record = draft("Wave Basics");
        record.learning_outcomes = vec!["Sketch a standing wave".to_string()];
        let stored = catalog.create(record).await.unwrap();
        assert_eq!(stored.learning_outcomes, vec!["Sketch a standing wave"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_but_preserves_created_at() {
        let catalog = catalog();
        let stored = catalog.create(draft("Original")).await.unwrap();

        let mut edited = stored.clone();
        edited.title = "Edited".to_string();
        edited.description = "New description.".to_string();
        edited.created_at = "2099-01-01T00:00:00Z".to_string();

        catalog.update(edited).await.unwrap();

        let listed = catalog.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Edited");
        assert_eq!(listed[0].id, stored.id);
        assert_eq!(listed[0].created_at, stored.created_at);
    }

    #[tokio::test]
    async fn update_of_an_unknown_id_is_a_no_op_success() {
        let catalog = catalog();
        catalog.create(draft("Only")).await.unwrap();

        let mut ghost = draft("Ghost");
        ghost.id = "no-such-id".to_string();
        catalog.update(ghost).await.unwrap();

        let listed = catalog.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Only");
    }

    #[tokio::test]
    async fn update_without_an_id_is_rejected() {
        let err = catalog().update(draft("No Id")).await.unwrap_err();
        assert!(matches!(err, PortError::MissingField("id")));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let catalog = catalog();
        let stored = catalog.create(draft("Doomed")).await.unwrap();

        catalog.delete(&stored.id).await.unwrap();
        assert!(catalog.list().await.unwrap().is_empty());

        // Second delete of the same id still succeeds.
        catalog.delete(&stored.id).await.unwrap();
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected() {
        let catalog = catalog();

        let mut record = draft("No Author");
        record.author = String::new();
        assert!(matches!(
            catalog.create(record).await.unwrap_err(),
            PortError::MissingField("author")
        ));

        let mut record = draft("No Content");
        record.content_url = String::new();
        assert!(matches!(
            catalog.create(record).await.unwrap_err(),
            PortError::MissingField("contentUrl")
        ));
    }

    #[tokio::test]
    async fn non_http_content_urls_are_rejected() {
        let catalog = catalog();
        let mut record = draft("Bad URL");
        record.content_url = "ftp://example.com/sim".to_string();
        assert!(matches!(
            catalog.create(record).await.unwrap_err(),
            PortError::InvalidField { field: "contentUrl", .. }
        ));
    }

    #[tokio::test]
    async fn an_unreachable_store_surfaces_as_unavailable() {
        let catalog = ResourceCatalog::new(
            Arc::new(OfflineStore),
            OutcomeEnricher::disabled(),
            CatalogLimits::default(),
        );
        assert!(matches!(
            catalog.list().await.unwrap_err(),
            PortError::Unavailable(_)
        ));
        assert!(matches!(
            catalog.create(draft("Offline")).await.unwrap_err(),
            PortError::Unavailable(_)
        ));
    }
}

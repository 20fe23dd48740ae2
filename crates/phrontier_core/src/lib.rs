pub mod assets;
pub mod catalog;
pub mod domain;
pub mod enrich;
pub mod memory;
pub mod ports;
pub mod session;

pub use assets::AssetGateway;
pub use catalog::{CatalogLimits, ResourceCatalog};
pub use domain::{categories, fallback_thumbnail, seed_resources, Category, Resource, ResourceType, User, UserRole};
pub use enrich::{fallback_outcomes, OutcomeEnricher};
pub use memory::MemoryStore;
pub use ports::{
    BlobStore, CollectionStore, OutcomeGenerator, PortError, PortResult, ThumbnailGenerator,
};
pub use session::{CatalogSession, SyncPhase};

//! crates/phrontier_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of the hosted key-value store, the blob store, and
//! the generative AI provider behind them.

use async_trait::async_trait;

use crate::domain::Resource;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// The error taxonomy shared by all port operations.
///
/// Adapters normalize provider-specific failures into these variants before
/// anything reaches the catalog or the web layer; a raw provider error never
/// crosses a port.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// A required field was absent or empty. Rejected before any remote call.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// A field was present but unusable (e.g. a non-http content URL).
    #[error("Invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
    /// A binary payload with zero bytes.
    #[error("Empty payload")]
    EmptyPayload,
    /// A binary payload over the accepted ceiling. The limit is part of the
    /// message so the user learns how to work around it.
    #[error("Payload exceeds the {limit_bytes} byte upload limit; host the file elsewhere and link it instead")]
    PayloadTooLarge { limit_bytes: usize },
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Upstream service unreachable or misconfigured. Fatal to the current
    /// operation; retrying without an operator fixing the configuration is
    /// pointless.
    #[error("Upstream service unavailable: {0}")]
    Unavailable(String),
    /// Upstream call exceeded its time bound. Transient; safe to retry
    /// manually.
    #[error("Upstream request timed out: {0}")]
    Timeout(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The shared resource collection: one JSON-encoded list under one logical
/// key in a hosted key-value store. Reads and writes move the whole list;
/// concurrency control is read-modify-write with last-write-wins.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Reads the whole collection. `None` means the key has never been
    /// written, which callers treat as an empty collection.
    async fn fetch(&self) -> PortResult<Option<Vec<Resource>>>;

    /// Replaces the whole collection.
    async fn store(&self, resources: &[Resource]) -> PortResult<()>;
}

/// An object store reachable by name. The store owns collision avoidance
/// (e.g. random suffixing); the filename is for display and debugging.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads a binary payload and returns a publicly retrievable URL.
    async fn put(&self, filename: &str, content_type: &str, bytes: &[u8]) -> PortResult<String>;
}

/// Generates a short ordered list of learning-outcome strings. May fail;
/// the enricher wrapping this port owns the never-failing fallback.
#[async_trait]
pub trait OutcomeGenerator: Send + Sync {
    async fn generate(
        &self,
        title: &str,
        category: &str,
        description: &str,
    ) -> PortResult<Vec<String>>;
}

/// Generates a thumbnail image for a resource.
#[async_trait]
pub trait ThumbnailGenerator: Send + Sync {
    /// `Ok(None)` means the provider produced no image candidate, which is
    /// not an error; the caller must have a fallback image policy.
    async fn generate(&self, title: &str, description: &str) -> PortResult<Option<Vec<u8>>>;
}

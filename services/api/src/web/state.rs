//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use phrontier_core::assets::AssetGateway;
use phrontier_core::catalog::ResourceCatalog;
use phrontier_core::ports::ThumbnailGenerator;

/// The shared application state, created once at startup and passed to all
/// handlers.
pub struct AppState {
    pub catalog: ResourceCatalog,
    pub assets: AssetGateway,
    /// Absent when no AI key is configured; the generate endpoint then
    /// reports thumbnail generation as unavailable.
    pub thumbnails: Option<Arc<dyn ThumbnailGenerator>>,
}

//! crates/phrontier_core/src/assets.rs
//!
//! The asset gateway: size and emptiness checks in front of the blob store
//! port. Rejections happen here, before any remote call; the adapter behind
//! the port owns transport concerns and its own time bound.

use std::sync::Arc;

use crate::ports::{BlobStore, PortError, PortResult};

pub struct AssetGateway {
    blob: Arc<dyn BlobStore>,
    max_bytes: usize,
}

impl AssetGateway {
    pub fn new(blob: Arc<dyn BlobStore>, max_bytes: usize) -> Self {
        Self { blob, max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Uploads a binary payload and returns its public URL.
    ///
    /// A zero-length payload is `EmptyPayload`; one over the configured
    /// ceiling is `PayloadTooLarge`. Neither reaches the blob store.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> PortResult<String> {
        if bytes.is_empty() {
            return Err(PortError::EmptyPayload);
        }
        if bytes.len() > self.max_bytes {
            return Err(PortError::PayloadTooLarge {
                limit_bytes: self.max_bytes,
            });
        }
        self.blob.put(filename, content_type, bytes).await
    }
}

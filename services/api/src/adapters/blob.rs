//! services/api/src/adapters/blob.rs
//!
//! This module contains the blob store adapter, the concrete implementation
//! of the `BlobStore` port from the `core` crate. The store is addressed by
//! pathname; it appends a random suffix to avoid collisions and answers
//! with the public URL of the stored object.

use std::time::Duration;

use async_trait::async_trait;
use phrontier_core::ports::{BlobStore, PortError, PortResult};
use serde::Deserialize;
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A blob store adapter that implements the `BlobStore` port.
#[derive(Clone)]
pub struct BlobAdapter {
    http: reqwest::Client,
    base_url: String,
    token: String,
    /// Upper wait bound for one upload. Exceeding it is a transient
    /// `Timeout`, retryable by the user.
    timeout: Duration,
}

impl BlobAdapter {
    /// Creates a new `BlobAdapter`.
    pub fn new(http: reqwest::Client, base_url: String, token: String, timeout: Duration) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        }
    }
}

/// The store's answer to a successful put.
#[derive(Deserialize)]
struct PutResponse {
    url: String,
}

//=========================================================================================
// `BlobStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl BlobStore for BlobAdapter {
    async fn put(&self, filename: &str, content_type: &str, bytes: &[u8]) -> PortResult<String> {
        let url = format!("{}/{}", self.base_url, filename);
        let response = self
            .http
            .put(&url)
            .bearer_auth(&self.token)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "1")
            .timeout(self.timeout)
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PortError::Timeout(format!("blob upload: {e}"))
                } else if e.is_connect() {
                    PortError::Unavailable(format!("blob upload: {e}"))
                } else {
                    PortError::Unexpected(format!("blob upload: {e}"))
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!(%status, "blob store rejected the write token");
            return Err(PortError::Unavailable(format!(
                "blob upload: credentials rejected ({status})"
            )));
        }
        if !status.is_success() {
            return Err(PortError::Unavailable(format!(
                "blob upload: upstream returned {status}"
            )));
        }

        let parsed: PutResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(format!("blob upload: malformed response: {e}")))?;
        Ok(parsed.url)
    }
}

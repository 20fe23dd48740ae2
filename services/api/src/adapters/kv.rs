//! services/api/src/adapters/kv.rs
//!
//! This module contains the hosted key-value store adapter, the concrete
//! implementation of the `CollectionStore` port from the `core` crate. It
//! speaks the Upstash-style Redis REST protocol: `GET {base}/get/{key}` and
//! `POST {base}/set/{key}` with a bearer token.

use async_trait::async_trait;
use phrontier_core::domain::Resource;
use phrontier_core::ports::{CollectionStore, PortError, PortResult};
use serde::Deserialize;
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A hosted key-value store adapter that implements the `CollectionStore`
/// port. The whole collection is one JSON array under one key.
#[derive(Clone)]
pub struct KvAdapter {
    http: reqwest::Client,
    base_url: String,
    token: String,
    key: String,
}

impl KvAdapter {
    /// Creates a new `KvAdapter`.
    pub fn new(http: reqwest::Client, base_url: String, token: String, key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            key,
        }
    }
}

//=========================================================================================
// Wire Types and Result Decoding
//=========================================================================================

/// The REST store wraps every response in a `result` envelope.
#[derive(Deserialize)]
struct KvResponse {
    result: Option<serde_json::Value>,
}

/// Decodes the value under the key. The store returns strings verbatim, so
/// the collection usually arrives as a JSON string containing a JSON array;
/// a raw array is tolerated too.
fn decode_collection(result: Option<serde_json::Value>) -> PortResult<Option<Vec<Resource>>> {
    match result {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(raw)) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PortError::Unexpected(format!("corrupt collection payload: {e}"))),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| PortError::Unexpected(format!("corrupt collection payload: {e}"))),
    }
}

fn transport_error(context: &str, e: reqwest::Error) -> PortError {
    if e.is_timeout() {
        PortError::Timeout(format!("{context}: {e}"))
    } else if e.is_connect() {
        PortError::Unavailable(format!("{context}: {e}"))
    } else {
        PortError::Unexpected(format!("{context}: {e}"))
    }
}

fn status_error(context: &str, status: reqwest::StatusCode) -> PortError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        PortError::Unavailable(format!("{context}: credentials rejected ({status})"))
    } else if status.is_server_error() {
        PortError::Unavailable(format!("{context}: upstream returned {status}"))
    } else {
        PortError::Unexpected(format!("{context}: upstream returned {status}"))
    }
}

//=========================================================================================
// `CollectionStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CollectionStore for KvAdapter {
    async fn fetch(&self) -> PortResult<Option<Vec<Resource>>> {
        let url = format!("{}/get/{}", self.base_url, self.key);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| transport_error("kv fetch", e))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "kv fetch rejected");
            return Err(status_error("kv fetch", response.status()));
        }

        let envelope: KvResponse = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(format!("kv fetch: malformed envelope: {e}")))?;
        decode_collection(envelope.result)
    }

    async fn store(&self, resources: &[Resource]) -> PortResult<()> {
        let url = format!("{}/set/{}", self.base_url, self.key);
        let body = serde_json::to_string(resources)
            .map_err(|e| PortError::Unexpected(format!("kv store: encoding failed: {e}")))?;

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error("kv store", e))?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "kv store rejected");
            return Err(status_error("kv store", response.status()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phrontier_core::domain::seed_resources;

    #[test]
    fn an_absent_key_decodes_to_none() {
        assert!(decode_collection(None).unwrap().is_none());
        assert!(decode_collection(Some(serde_json::Value::Null)).unwrap().is_none());
    }

    #[test]
    fn a_string_wrapped_array_decodes() {
        let raw = serde_json::to_string(&seed_resources()).unwrap();
        let decoded = decode_collection(Some(serde_json::Value::String(raw)))
            .unwrap()
            .unwrap();
        assert_eq!(decoded, seed_resources());
    }

    #[test]
    fn a_raw_array_decodes() {
        let value = serde_json::to_value(seed_resources()).unwrap();
        let decoded = decode_collection(Some(value)).unwrap().unwrap();
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn garbage_is_reported_not_swallowed() {
        let err = decode_collection(Some(serde_json::Value::String("not json".to_string())))
            .unwrap_err();
        assert!(matches!(err, PortError::Unexpected(_)));
    }
}

//! services/api/src/adapters/thumbnail_llm.rs
//!
//! This module contains the adapter for thumbnail image generation.
//! It implements the `ThumbnailGenerator` port from the `core` crate.
//!
//! The image model is only reachable over the provider's native REST
//! surface (`models/{model}:generateContent`), so this adapter speaks it
//! directly instead of going through the chat SDK.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use phrontier_core::ports::{PortError, PortResult, ThumbnailGenerator};
use serde::{Deserialize, Serialize};
use tracing::warn;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ThumbnailGenerator` against a generative
/// image model.
#[derive(Clone)]
pub struct GeminiThumbnailAdapter {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    /// Upper wait bound; exceeding it is treated the same as "no image
    /// produced" by the caller's fallback policy.
    timeout: Duration,
}

impl GeminiThumbnailAdapter {
    /// Creates a new `GeminiThumbnailAdapter`.
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            timeout,
        }
    }

    /// Terse, descriptive prompt. User text is embedded as plain words in a
    /// fixed template; nothing from it is treated as instructions.
    fn prompt(title: &str, description: &str) -> String {
        format!(
            "A clean, professional 3D scientific illustration: {title}. {description}. \
             High-tech laboratory style, cinematic lighting, 1:1 ratio, no text."
        )
    }
}

//=========================================================================================
// Wire Types
//=========================================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    image_config: ImageConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Pulls the first inline image out of a response, if any candidate
/// carried one.
fn first_image(response: GenerateResponse) -> Option<InlineData> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.inline_data)
}

//=========================================================================================
// `ThumbnailGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl ThumbnailGenerator for GeminiThumbnailAdapter {
    async fn generate(&self, title: &str, description: &str) -> PortResult<Option<Vec<u8>>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(Self::prompt(title, description)),
                    inline_data: None,
                }],
            }],
            generation_config: GenerationConfig {
                image_config: ImageConfig {
                    aspect_ratio: "1:1".to_string(),
                },
            },
        };

        let send = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send();

        let response = send.await.map_err(|e| {
            if e.is_timeout() {
                PortError::Timeout("thumbnail generation".to_string())
            } else if e.is_connect() {
                PortError::Unavailable(format!("thumbnail generation: {e}"))
            } else {
                PortError::Unexpected(format!("thumbnail generation: {e}"))
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PortError::Unavailable(format!(
                "thumbnail generation: credentials rejected ({status})"
            )));
        }
        if !status.is_success() {
            warn!(%status, "image model rejected the request");
            return Err(PortError::Unavailable(format!(
                "thumbnail generation: upstream returned {status}"
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            PortError::Unexpected(format!("thumbnail generation: malformed response: {e}"))
        })?;

        match first_image(parsed) {
            Some(inline) => {
                let bytes = BASE64.decode(inline.data.as_bytes()).map_err(|e| {
                    PortError::Unexpected(format!("thumbnail generation: bad base64: {e}"))
                })?;
                Ok(Some(bytes))
            }
            // No candidate carried an image; the caller falls back.
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_first_inline_image_wins() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    { "content": { "parts": [
                        { "text": "here is your image" },
                        { "inlineData": { "mimeType": "image/png", "data": "QUJD" } },
                        { "inlineData": { "mimeType": "image/png", "data": "WFla" } }
                    ] } }
                ]
            }"#,
        )
        .unwrap();
        let image = first_image(response).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "QUJD");
        assert_eq!(BASE64.decode(image.data).unwrap(), b"ABC");
    }

    #[test]
    fn a_text_only_response_yields_no_image() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{ "candidates": [ { "content": { "parts": [ { "text": "sorry" } ] } } ] }"#,
        )
        .unwrap();
        assert!(first_image(response).is_none());
    }

    #[test]
    fn an_empty_response_yields_no_image() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(first_image(response).is_none());
    }

    #[test]
    fn the_prompt_embeds_title_and_description() {
        let prompt = GeminiThumbnailAdapter::prompt("Projectile Motion", "trajectories");
        assert!(prompt.contains("Projectile Motion"));
        assert!(prompt.contains("trajectories"));
        assert!(prompt.contains("no text"));
    }
}

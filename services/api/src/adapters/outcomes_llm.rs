//! services/api/src/adapters/outcomes_llm.rs
//!
//! This module contains the adapter for the learning-outcome LLM.
//! It implements the `OutcomeGenerator` port from the `core` crate.
//!
//! The provider is asked for a bare JSON array, but its output is treated
//! as hostile: code fences are stripped and anything that still fails to
//! parse is reported as an error for the enricher's fallback to absorb.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use phrontier_core::ports::{OutcomeGenerator, PortError, PortResult};

const SYSTEM_INSTRUCTIONS: &str = "You are a physics curriculum assistant. Given the title, category, and description of a learning resource, produce the learning outcomes a student should achieve with it. Respond with ONLY a JSON array of at most 3 short outcome strings. No markdown, no code fences, no commentary.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `OutcomeGenerator` using an OpenAI-compatible
/// LLM.
#[derive(Clone)]
pub struct OpenAiOutcomeAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiOutcomeAdapter {
    /// Creates a new `OpenAiOutcomeAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }
}

//=========================================================================================
// Output Parsing
//=========================================================================================

/// Drops a wrapping markdown code fence, with or without a language tag.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

fn parse_outcomes(raw: &str) -> PortResult<Vec<String>> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned)
        .map_err(|e| PortError::Unexpected(format!("unparseable outcome list: {e}")))
}

//=========================================================================================
// `OutcomeGenerator` Trait Implementation
//=========================================================================================

#[async_trait]
impl OutcomeGenerator for OpenAiOutcomeAdapter {
    async fn generate(
        &self,
        title: &str,
        category: &str,
        description: &str,
    ) -> PortResult<Vec<String>> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(format!(
                    "TITLE: {title}\nCATEGORY: {category}\nDESCRIPTION: {description}"
                ))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(200u32)
            .temperature(0.2)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Bound the wait here so a stalled provider degrades into the
        // enricher's fallback instead of hanging a publish.
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| PortError::Timeout("learning outcome generation".to_string()))?
            .map_err(|e: OpenAIError| PortError::Unavailable(e.to_string()))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("outcome LLM response contained no text content".to_string())
            })?;

        parse_outcomes(&content)
    }
}

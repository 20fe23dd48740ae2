//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The
//! `.env` file is used for local development. A missing required variable
//! is reported by name, so an operator sees a configuration error rather
//! than a generic failure.

use std::net::SocketAddr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// Base URL of the hosted key-value store's REST API.
    pub kv_url: String,
    pub kv_token: String,
    /// The single logical key the resource collection lives under.
    pub kv_key: String,
    /// Base URL of the blob store's REST API.
    pub blob_url: String,
    pub blob_token: String,
    /// Generative AI is optional: without a key, outcome suggestions use the
    /// deterministic fallback and thumbnail generation is reported as
    /// unconfigured.
    pub ai_api_key: Option<String>,
    /// OpenAI-compatible chat endpoint used for outcome generation.
    pub ai_chat_base: String,
    /// Native REST endpoint used for image generation.
    pub ai_rest_base: String,
    pub outcome_model: String,
    pub image_model: String,
    pub max_items: usize,
    pub max_thumbnail_len: usize,
    pub max_upload_bytes: usize,
    pub upload_timeout: Duration,
    pub ai_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for
    /// development, but this is skipped in test environments to ensure
    /// tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Load Server Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Load Store Settings (required) ---
        let kv_url = require_var("KV_REST_API_URL")?;
        let kv_token = require_var("KV_REST_API_TOKEN")?;
        let kv_key =
            std::env::var("KV_KEY").unwrap_or_else(|_| "phrontier_global_v2".to_string());

        let blob_url = require_var("BLOB_STORE_URL")?;
        let blob_token = require_var("BLOB_READ_WRITE_TOKEN")?;

        // --- Load AI Settings (key is optional) ---
        let ai_api_key = std::env::var("AI_API_KEY").ok();
        let ai_chat_base = std::env::var("AI_CHAT_BASE_URL").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
        });
        let ai_rest_base = std::env::var("AI_REST_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let outcome_model =
            std::env::var("OUTCOME_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());
        let image_model =
            std::env::var("IMAGE_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-image".to_string());

        // --- Load Catalog and Gateway Limits ---
        let max_items = parse_var("MAX_ITEMS", 20usize)?;
        let max_thumbnail_len = parse_var("MAX_THUMBNAIL_LEN", 5000usize)?;
        let max_upload_bytes = parse_var("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?;
        let upload_timeout = Duration::from_secs(parse_var("UPLOAD_TIMEOUT_SECS", 120u64)?);
        let ai_timeout = Duration::from_secs(parse_var("AI_TIMEOUT_SECS", 18u64)?);

        Ok(Self {
            bind_address,
            log_level,
            kv_url,
            kv_token,
            kv_key,
            blob_url,
            blob_token,
            ai_api_key,
            ai_chat_base,
            ai_rest_base,
            outcome_model,
            image_model,
            max_items,
            max_thumbnail_len,
            max_upload_bytes,
            upload_timeout,
            ai_timeout,
        })
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so everything lives in one test
    // to keep the suite free of ordering effects.
    #[test]
    fn loading_reports_missing_and_invalid_variables_by_name() {
        let required = [
            ("KV_REST_API_URL", "https://kv.example.com"),
            ("KV_REST_API_TOKEN", "kv-token"),
            ("BLOB_STORE_URL", "https://blob.example.com"),
            ("BLOB_READ_WRITE_TOKEN", "blob-token"),
        ];
        for (name, _) in required {
            std::env::remove_var(name);
        }
        // Ambient variables from the developer shell would skew the
        // assertions below.
        for name in ["MAX_ITEMS", "RUST_LOG", "BIND_ADDRESS", "AI_API_KEY", "KV_KEY"] {
            std::env::remove_var(name);
        }

        match Config::from_env() {
            Err(ConfigError::MissingVar(name)) => assert_eq!(name, "KV_REST_API_URL"),
            other => panic!("expected MissingVar, got {other:?}"),
        }

        for (name, value) in required {
            std::env::set_var(name, value);
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.kv_key, "phrontier_global_v2");
        assert_eq!(config.max_items, 20);
        assert_eq!(config.max_thumbnail_len, 5000);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.ai_api_key.is_none());

        std::env::set_var("MAX_ITEMS", "not-a-number");
        match Config::from_env() {
            Err(ConfigError::InvalidValue(name, _)) => assert_eq!(name, "MAX_ITEMS"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }

        std::env::set_var("MAX_ITEMS", "5");
        assert_eq!(Config::from_env().unwrap().max_items, 5);

        for (name, _) in required {
            std::env::remove_var(name);
        }
        std::env::remove_var("MAX_ITEMS");
    }
}

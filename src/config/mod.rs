//! Environment-backed runtime configuration plus the persisted recruiter settings.
//!
//! [`Config`] covers the scoring provider and process knobs (override with
//! `SCORELY_*` environment variables). [`PipelineConfig`] is the recruiter's
//! saved configuration: rejection lists, red flags, thresholds, ideal profiles,
//! summary columns and the row range.

pub mod error;
pub mod pipeline;


pub use error::ConfigError;
pub use pipeline::{PipelineConfig, RedFlagSettings, RejectionLists};

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_ECONOMY_MODEL, DEFAULT_EMBEDDING_MODEL, DEFAULT_FULL_MODEL,
    EMBEDDING_CACHE_CAPACITY,
};

/// Provider and process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SCORELY_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// OpenAI-compatible API root used for embeddings. Default: `https://api.openai.com/v1`.
    pub api_base_url: String,

    /// API key for the embeddings endpoint. Falls back to `OPENAI_API_KEY`.
    pub api_key: Option<String>,

    /// Embedding model. Default: `text-embedding-3-small`.
    pub embedding_model: String,

    /// Model used on the hybrid path. Default: `gpt-4o`.
    pub full_model: String,

    /// Cheaper hybrid-path model used in economy mode. Default: `gpt-3.5-turbo`.
    pub economy_model: String,

    /// Per-request timeout for provider calls. Default: 60 seconds.
    pub request_timeout: Duration,

    /// Max cached candidate embeddings. Default: `10_000`.
    pub embedding_cache_capacity: u64,

    /// Saved pipeline configuration (JSON), if any.
    pub pipeline_path: Option<PathBuf>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("embedding_model", &self.embedding_model)
            .field("full_model", &self.full_model)
            .field("economy_model", &self.economy_model)
            .field("request_timeout", &self.request_timeout)
            .field("embedding_cache_capacity", &self.embedding_cache_capacity)
            .field("pipeline_path", &self.pipeline_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            full_model: DEFAULT_FULL_MODEL.to_string(),
            economy_model: DEFAULT_ECONOMY_MODEL.to_string(),
            request_timeout: Duration::from_secs(60),
            embedding_cache_capacity: EMBEDDING_CACHE_CAPACITY,
            pipeline_path: None,
        }
    }
}

impl Config {
    const ENV_API_BASE_URL: &'static str = "SCORELY_API_BASE_URL";
    const ENV_API_KEY: &'static str = "SCORELY_API_KEY";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_EMBEDDING_MODEL: &'static str = "SCORELY_EMBEDDING_MODEL";
    const ENV_FULL_MODEL: &'static str = "SCORELY_FULL_MODEL";
    const ENV_ECONOMY_MODEL: &'static str = "SCORELY_ECONOMY_MODEL";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "SCORELY_REQUEST_TIMEOUT_SECS";
    const ENV_EMBEDDING_CACHE_CAPACITY: &'static str = "SCORELY_EMBEDDING_CACHE_CAPACITY";
    const ENV_PIPELINE_PATH: &'static str = "SCORELY_PIPELINE_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url = Self::parse_string_from_env(Self::ENV_API_BASE_URL, defaults.api_base_url);
        let api_key = Self::parse_optional_string_from_env(Self::ENV_API_KEY)
            .or_else(|| Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY));
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let full_model = Self::parse_string_from_env(Self::ENV_FULL_MODEL, defaults.full_model);
        let economy_model =
            Self::parse_string_from_env(Self::ENV_ECONOMY_MODEL, defaults.economy_model);
        let request_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        )?);
        let embedding_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_CACHE_CAPACITY,
            defaults.embedding_cache_capacity,
        )?;
        let pipeline_path =
            Self::parse_optional_string_from_env(Self::ENV_PIPELINE_PATH).map(PathBuf::from);

        Ok(Self {
            api_base_url,
            api_key,
            embedding_model,
            full_model,
            economy_model,
            request_timeout,
            embedding_cache_capacity,
            pipeline_path,
        })
    }

    /// Validates basic invariants (does not contact the provider).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_API_BASE_URL,
            });
        }
        if self.embedding_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_EMBEDDING_MODEL,
            });
        }
        if self.full_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_FULL_MODEL,
            });
        }
        if self.economy_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_ECONOMY_MODEL,
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_REQUEST_TIMEOUT_SECS,
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        if let Some(ref path) = self.pipeline_path
            && !path.exists()
        {
            return Err(ConfigError::PathNotFound { path: path.clone() });
        }

        Ok(())
    }

    /// Returns the embeddings endpoint URL.
    pub fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.api_base_url.trim_end_matches('/'))
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    name: var_name,
                    value: value.clone(),
                    reason: e.to_string(),
                }),
            Err(_) => Ok(default),
        }
    }
}

//! Configuration
//!
//! Layered configuration: built-in defaults, the global user file, the
//! selected config file and `CURATOR__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuratorConfig {
    /// Endpoints that each list agent repositories.
    #[serde(default)]
    pub agent_sources: Vec<SourceConfig>,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CuratorConfig {
    /// Sources with `enabled = true`, in configured order.
    pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
        self.agent_sources.iter().filter(|s| s.enabled).collect()
    }
}

/// One configured repository source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: String,

    /// URL of a JSON object keyed by repository id.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SourceConfig {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: Some(url.into()),
            enabled: true,
            description: None,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Base URL of the repository contents API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL used to build repository and file links
    #[serde(default = "default_web_base")]
    pub web_base: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            api_base: default_api_base(),
            web_base: default_web_base(),
            user_agent: default_user_agent(),
        }
    }
}

/// Listing document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_output_file")]
    pub output_file: String,

    #[serde(default = "default_title")]
    pub title: String,

    /// Descriptions longer than this many characters are truncated
    #[serde(default = "default_description_max_len")]
    pub description_max_len: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            title: default_title(),
            description_max_len: default_description_max_len(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_web_base() -> String {
    "https://github.com".to_string()
}

fn default_user_agent() -> String {
    format!("curator/{}", env!("CARGO_PKG_VERSION"))
}

fn default_output_file() -> String {
    "README.md".to_string()
}

fn default_title() -> String {
    "Awesome Claude Agents".to_string()
}

fn default_description_max_len() -> usize {
    100
}
